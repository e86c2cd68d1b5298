pub mod schedule;
pub mod vehicle;
pub mod worker;
