use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::ShiftTimetable;
use crate::models::schedule::{ScheduleAssignment, ScheduleEvent, ScheduleKey};
use crate::models::vehicle::Vehicle;
use crate::models::worker::Worker;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub workers: DashMap<Uuid, Worker>,
    pub vehicles: DashMap<Uuid, Vehicle>,
    /// Upper-cased vehicle number to vehicle id.
    pub vehicle_numbers: DashMap<String, Uuid>,
    /// One complete run per key; replaced wholesale on regeneration.
    pub schedules: DashMap<ScheduleKey, Vec<ScheduleAssignment>>,
    pub schedule_events_tx: broadcast::Sender<ScheduleEvent>,
    pub timetable: ShiftTimetable,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize, timetable: ShiftTimetable) -> Self {
        let (schedule_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            workers: DashMap::new(),
            vehicles: DashMap::new(),
            vehicle_numbers: DashMap::new(),
            schedules: DashMap::new(),
            schedule_events_tx,
            timetable,
            metrics: Metrics::new(),
        }
    }
}
