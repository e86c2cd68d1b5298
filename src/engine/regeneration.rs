use std::time::Instant;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::scheduler::{generate_schedule, ScheduleRequest};
use crate::engine::selection::{available_vehicles, eligible_workers};
use crate::error::{AppError, ScheduleError};
use crate::models::schedule::{ScheduleEvent, ScheduleKey, ScheduleReport};
use crate::models::vehicle::Vehicle;
use crate::models::worker::Worker;
use crate::state::AppState;

/// Recomputes the schedule for one (date, shift) and swaps it in.
///
/// The previous assignments for the key stay untouched unless the run
/// succeeds; on success they are replaced in a single map write.
pub fn regenerate_schedule(
    state: &AppState,
    request: &ScheduleRequest,
) -> Result<ScheduleReport, AppError> {
    let start = Instant::now();

    match run(state, request) {
        Ok(report) => {
            state
                .metrics
                .record_run("success", start.elapsed().as_secs_f64());
            Ok(report)
        }
        Err(err) => {
            state
                .metrics
                .record_run("error", start.elapsed().as_secs_f64());
            error!(error = %err, "schedule generation failed");
            Err(err.into())
        }
    }
}

fn run(state: &AppState, request: &ScheduleRequest) -> Result<ScheduleReport, ScheduleError> {
    let key = request.key()?;
    let ScheduleKey { date, shift } = key;

    // Held until the new list is stored, so runs for one key happen one at
    // a time and each reads the registry after the previous run finished.
    let slot = state.schedules.entry(key);

    let roster: Vec<Worker> = state.workers.iter().map(|e| e.value().clone()).collect();
    let fleet: Vec<Vehicle> = state.vehicles.iter().map(|e| e.value().clone()).collect();

    let workers = eligible_workers(&roster, shift);
    let vehicles = available_vehicles(&fleet);

    let outcome = generate_schedule(request, &workers, &vehicles, &state.timetable)?;
    drop(slot.insert(outcome.assignments.clone()));

    let summary = outcome.summary();

    state
        .metrics
        .unassigned_workers
        .with_label_values(&[shift.as_str()])
        .set(outcome.unassigned_workers.len() as i64);
    state
        .metrics
        .vehicles_used
        .with_label_values(&[shift.as_str()])
        .set(outcome.vehicles_used as i64);

    let _ = state.schedule_events_tx.send(ScheduleEvent {
        id: Uuid::new_v4(),
        key,
        summary,
        generated_at: Utc::now(),
    });

    if !outcome.unassigned_workers.is_empty() {
        warn!(
            date = %date,
            shift = %shift,
            unassigned = outcome.unassigned_workers.len(),
            "vehicle capacity exhausted; some workers have no seat"
        );
    }

    info!(
        date = %date,
        shift = %shift,
        total_workers = summary.total_workers,
        assigned_workers = summary.assigned_workers,
        vehicles_used = summary.vehicles_used,
        "schedule generated"
    );

    Ok(ScheduleReport {
        key,
        assignments: outcome.assignments,
        summary,
        unassigned_workers: outcome.unassigned_workers,
    })
}
