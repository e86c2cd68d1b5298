pub mod regeneration;
pub mod scheduler;
pub mod selection;
