use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::worker::{Shift, Worker};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Unit of regeneration: all assignments for one date and shift are
/// replaced together.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub date: NaiveDate,
    pub shift: Shift,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleAssignment {
    pub date: NaiveDate,
    pub shift: Shift,
    pub worker_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_time: NaiveTime,
    pub drop_time: NaiveTime,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub total_workers: usize,
    pub assigned_workers: usize,
    pub vehicles_used: usize,
}

/// Result of one regeneration as returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub key: ScheduleKey,
    pub assignments: Vec<ScheduleAssignment>,
    pub summary: ScheduleSummary,
    pub unassigned_workers: Vec<Worker>,
}

/// Broadcast to websocket subscribers after a schedule is replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: Uuid,
    pub key: ScheduleKey,
    pub summary: ScheduleSummary,
    pub generated_at: DateTime<Utc>,
}
