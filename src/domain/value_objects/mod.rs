//! Value objects - Immutable objects defined by their attributes

mod ids;
mod settings;
mod tier;

pub use ids::*;
pub use settings::{CostSchedule, ScheduleViolation};
pub use tier::ProfessionTier;
