use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ShiftTimetable;
use crate::error::ScheduleError;
use crate::models::schedule::{AssignmentStatus, ScheduleAssignment, ScheduleKey, ScheduleSummary};
use crate::models::vehicle::Vehicle;
use crate::models::worker::{Shift, Worker};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub date: Option<NaiveDate>,
    pub shift: Option<Shift>,
}

impl ScheduleRequest {
    pub fn new(date: NaiveDate, shift: Shift) -> Self {
        Self {
            date: Some(date),
            shift: Some(shift),
        }
    }

    /// The (date, shift) this request regenerates; both must be present.
    pub fn key(&self) -> Result<ScheduleKey, ScheduleError> {
        match (self.date, self.shift) {
            (Some(date), Some(shift)) => Ok(ScheduleKey { date, shift }),
            _ => Err(ScheduleError::InvalidInput(
                "date and shift are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    pub assignments: Vec<ScheduleAssignment>,
    pub assigned_count: usize,
    pub unassigned_workers: Vec<Worker>,
    pub vehicles_used: usize,
}

impl ScheduleOutcome {
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            total_workers: self.assigned_count + self.unassigned_workers.len(),
            assigned_workers: self.assigned_count,
            vehicles_used: self.vehicles_used,
        }
    }
}

/// Seats workers into vehicles with a single first-fit pass.
///
/// Workers go highest priority first (name, then id, on ties); vehicles are
/// filled largest first (vehicle number, then id, on ties). A full vehicle
/// is never revisited, and once vehicles run out every remaining worker is
/// reported unassigned rather than failing.
pub fn generate_schedule(
    request: &ScheduleRequest,
    workers: &[Worker],
    vehicles: &[Vehicle],
    timetable: &ShiftTimetable,
) -> Result<ScheduleOutcome, ScheduleError> {
    let ScheduleKey { date, shift } = request.key()?;

    if workers.is_empty() {
        return Err(ScheduleError::NoWorkers);
    }
    if vehicles.is_empty() {
        return Err(ScheduleError::NoVehicles);
    }

    let mut sorted_workers: Vec<&Worker> = workers.iter().collect();
    sorted_workers.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut seen: HashSet<Uuid> = HashSet::with_capacity(sorted_workers.len());
    sorted_workers.retain(|worker| seen.insert(worker.id));

    let mut sorted_vehicles: Vec<&Vehicle> = vehicles.iter().collect();
    sorted_vehicles.sort_by(|a, b| {
        b.seats
            .cmp(&a.seats)
            .then_with(|| a.vehicle_number.cmp(&b.vehicle_number))
            .then_with(|| a.id.cmp(&b.id))
    });

    let times = timetable.times_for(shift);
    let mut assignments = Vec::with_capacity(sorted_workers.len());
    let mut unassigned_workers = Vec::new();
    let mut cursor = 0usize;
    let mut occupancy = 0u16;
    let mut vehicles_used = 0usize;

    for (index, worker) in sorted_workers.iter().enumerate() {
        while cursor < sorted_vehicles.len() && occupancy >= sorted_vehicles[cursor].seats {
            cursor += 1;
            occupancy = 0;
        }

        let Some(vehicle) = sorted_vehicles.get(cursor) else {
            unassigned_workers.extend(sorted_workers[index..].iter().map(|w| (*w).clone()));
            break;
        };

        occupancy += 1;
        vehicles_used = cursor + 1;
        assignments.push(ScheduleAssignment {
            date,
            shift,
            worker_id: worker.id,
            vehicle_id: vehicle.id,
            pickup_time: times.pickup,
            drop_time: times.drop,
            status: AssignmentStatus::Scheduled,
        });
    }

    Ok(ScheduleOutcome {
        assigned_count: assignments.len(),
        assignments,
        unassigned_workers,
        vehicles_used,
    })
}
