use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_number: String,
    pub seats: u16,
    pub is_available: bool,
    pub updated_at: DateTime<Utc>,
}
