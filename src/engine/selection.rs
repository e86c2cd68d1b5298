use crate::models::vehicle::Vehicle;
use crate::models::worker::{Shift, Worker};

pub fn eligible_workers<'a, I>(workers: I, shift: Shift) -> Vec<Worker>
where
    I: IntoIterator<Item = &'a Worker>,
{
    workers
        .into_iter()
        .filter(|worker| worker.is_active && worker.shift == shift)
        .cloned()
        .collect()
}

pub fn available_vehicles<'a, I>(vehicles: I) -> Vec<Vehicle>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    vehicles
        .into_iter()
        .filter(|vehicle| vehicle.is_available)
        .cloned()
        .collect()
}
