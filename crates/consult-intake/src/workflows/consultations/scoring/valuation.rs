use super::super::domain::{CompanySize, Urgency};

pub const BASE_VALUE: f64 = 50_000.0;
const INTEREST_STEP: f64 = 0.1;

pub fn size_multiplier(size: Option<CompanySize>) -> f64 {
    match size {
        Some(CompanySize::Micro) => 0.5,
        Some(CompanySize::Small) => 0.8,
        Some(CompanySize::Medium) => 1.0,
        Some(CompanySize::Large) => 1.5,
        Some(CompanySize::Enterprise) => 2.0,
        Some(CompanySize::Global) => 3.0,
        None => 1.0,
    }
}

pub fn urgency_multiplier(urgency: Option<Urgency>) -> f64 {
    match urgency {
        Some(Urgency::Low) => 0.8,
        Some(Urgency::Medium) | None => 1.0,
        Some(Urgency::High) => 1.3,
    }
}

/// Grows by a tenth per selected tag, with no upper bound.
pub fn interest_multiplier(interest_count: usize) -> f64 {
    1.0 + interest_count as f64 * INTEREST_STEP
}

/// Monetary estimate of the opportunity, rounded half away from zero.
pub fn estimate_value(
    size: Option<CompanySize>,
    urgency: Option<Urgency>,
    interest_count: usize,
) -> u64 {
    let value = BASE_VALUE
        * size_multiplier(size)
        * urgency_multiplier(urgency)
        * interest_multiplier(interest_count);
    value.round().max(0.0) as u64
}
