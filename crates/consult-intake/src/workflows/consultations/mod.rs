//! Consultation intake: form validation, lead scoring, record assembly, and the admin
//! endpoints that manage booked consultations.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{
    CompanySize, ConsultationForm, ConsultationId, ConsultationPatch, ConsultationRecord,
    ConsultationStatus, ConsultationSummary, FormOptions, Urgency, INDUSTRIES, INTEREST_TAGS,
    TIMEZONES, TIME_SLOTS,
};
pub use intake::{validate, IntakeField, ValidatedIntake, ValidationErrors};
pub use repository::{
    ConsultationFilter, ConsultationOrder, ConsultationRepository, ConsultationStats,
    RepositoryError,
};
pub use router::{consultation_router, ConsultationApi};
pub use scoring::{LeadAssessment, LeadScorer, LeadSignals, ScoreBreakdown};
pub use service::{ConsultationService, ConsultationServiceError};
