//! Lead valuation and priority scoring.
//!
//! The monetary estimate and the priority score use separate weighting tables and neither
//! is derived from the other.

mod priority;
mod valuation;

pub use priority::{priority_score, MAX_SCORE};
pub use valuation::estimate_value;

use super::domain::{CompanySize, ConsultationForm, Urgency};
use serde::{Deserialize, Serialize};

/// Scoring inputs after enum parsing; unrecognised labels stay `None` and take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSignals {
    pub company_size: Option<CompanySize>,
    pub urgency: Option<Urgency>,
    pub interest_count: usize,
}

impl LeadSignals {
    pub fn from_form(form: &ConsultationForm) -> Self {
        Self {
            company_size: CompanySize::from_label(&form.company_size),
            urgency: Urgency::from_label(&form.urgency),
            interest_count: form.interest_count(),
        }
    }
}

/// Per-factor weights behind an assessment, for audit output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub size_multiplier: f64,
    pub urgency_multiplier: f64,
    pub interest_multiplier: f64,
    pub size_points: u32,
    pub urgency_points: u32,
    pub interest_points: u32,
}

/// Derived values computed once per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAssessment {
    pub estimated_value: u64,
    pub priority_score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Stateless scorer applying both weighting tables to a set of signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadScorer;

impl LeadScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, signals: LeadSignals) -> LeadAssessment {
        let LeadSignals {
            company_size,
            urgency,
            interest_count,
        } = signals;

        LeadAssessment {
            estimated_value: estimate_value(company_size, urgency, interest_count),
            priority_score: priority_score(company_size, urgency, interest_count),
            breakdown: ScoreBreakdown {
                size_multiplier: valuation::size_multiplier(company_size),
                urgency_multiplier: valuation::urgency_multiplier(urgency),
                interest_multiplier: valuation::interest_multiplier(interest_count),
                size_points: priority::size_points(company_size),
                urgency_points: priority::urgency_points(urgency),
                interest_points: priority::interest_points(interest_count),
            },
        }
    }

    pub fn assess_form(&self, form: &ConsultationForm) -> LeadAssessment {
        self.assess(LeadSignals::from_form(form))
    }
}
