use super::super::domain::{CompanySize, Urgency};

pub const BASE_SCORE: u32 = 50;
pub const MAX_SCORE: u8 = 100;
const POINTS_PER_INTEREST: u32 = 2;

pub fn urgency_points(urgency: Option<Urgency>) -> u32 {
    match urgency {
        Some(Urgency::Low) | None => 0,
        Some(Urgency::Medium) => 20,
        Some(Urgency::High) => 40,
    }
}

pub fn size_points(size: Option<CompanySize>) -> u32 {
    match size {
        Some(CompanySize::Micro) => 5,
        Some(CompanySize::Small) => 10,
        Some(CompanySize::Medium) => 15,
        Some(CompanySize::Large) => 25,
        Some(CompanySize::Enterprise) => 35,
        Some(CompanySize::Global) => 45,
        None => 0,
    }
}

pub fn interest_points(interest_count: usize) -> u32 {
    u32::try_from(interest_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_INTEREST)
}

/// Additive lead priority, hard-capped at `MAX_SCORE`.
pub fn priority_score(
    size: Option<CompanySize>,
    urgency: Option<Urgency>,
    interest_count: usize,
) -> u8 {
    let raw = BASE_SCORE
        .saturating_add(urgency_points(urgency))
        .saturating_add(size_points(size))
        .saturating_add(interest_points(interest_count));
    raw.min(u32::from(MAX_SCORE)) as u8
}
