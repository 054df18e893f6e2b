//! Personal alignment between the current situation and a profile.

use crate::domain::analysis::{QuestionComplexity, TemporalFactors};
use crate::domain::foundation::clamp_unit;

use super::{UserProfile, UNIFORM_TIME_WEIGHT};

const BASE_ALIGNMENT: f64 = 0.5;
const COMPLEXITY_MATCH_BONUS: f64 = 0.2;

/// Alignment in [0, 1].
///
/// Starts at 0.5, adds 0.2 when the question's complexity matches the
/// preferred one, then adds how far the current time-of-day weight sits
/// above a uniform split. Night carries no weight and contributes nothing.
pub fn calculate_personal_alignment(
    temporal: &TemporalFactors,
    complexity: QuestionComplexity,
    profile: &UserProfile,
) -> f64 {
    let mut alignment = BASE_ALIGNMENT;

    if complexity == profile.preferred_complexity {
        alignment += COMPLEXITY_MATCH_BONUS;
    }
    if let Some(weight) = profile.time_preference(temporal.time_of_day) {
        alignment += weight - UNIFORM_TIME_WEIGHT;
    }

    clamp_unit(alignment)
}
