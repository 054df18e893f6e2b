//! Profile module - per-session preferences and their alignment signal.

mod alignment;
#[allow(clippy::module_inception)]
mod profile;

pub use alignment::calculate_personal_alignment;
pub use profile::{
    ContextEntry, DecisionStyle, UserProfile, CONTEXT_LOG_LIMIT, PREFERENCE_BUCKETS,
    UNIFORM_TIME_WEIGHT,
};
