use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::domain::{
    ConsultationForm, ConsultationId, ConsultationPatch, ConsultationRecord, ConsultationStatus,
};
use super::intake::{self, ValidatedIntake, ValidationErrors};
use super::repository::{
    ConsultationFilter, ConsultationOrder, ConsultationRepository, ConsultationStats,
    RepositoryError,
};
use super::scoring::{LeadAssessment, LeadScorer};
use crate::workflows::activity::{ActivityLog, NewActivity};

pub const UPCOMING_LIMIT: usize = 5;

/// Service composing intake validation, lead scoring, the repository, and the activity log.
pub struct ConsultationService<R, L> {
    repository: Arc<R>,
    activity: Arc<L>,
    scorer: LeadScorer,
}

impl<R, L> ConsultationService<R, L>
where
    R: ConsultationRepository + 'static,
    L: ActivityLog + 'static,
{
    pub fn new(repository: Arc<R>, activity: Arc<L>) -> Self {
        Self {
            repository,
            activity,
            scorer: LeadScorer::new(),
        }
    }

    /// Validate, score, and persist a booking form.
    pub fn submit(
        &self,
        form: ConsultationForm,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        self.submit_on(form, Local::now().date_naive(), Utc::now())
    }

    /// `submit` with an explicit calendar day for the date check and assembly time.
    pub fn submit_on(
        &self,
        form: ConsultationForm,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        let intake = match intake::validate(&form, today) {
            Ok(intake) => intake,
            Err(errors) => {
                debug!(fields = %errors, "consultation form rejected");
                return Err(errors.into());
            }
        };

        let assessment = self.scorer.assess_form(&form);
        let consultation_id =
            ConsultationId::generate_at(now.timestamp_millis(), &mut rand::thread_rng());
        let record = assemble_record(form, intake, &assessment, consultation_id, now);

        let stored = self.repository.insert(record)?;
        info!(
            consultation_id = %stored.consultation_id,
            estimated_value = stored.estimated_value,
            priority_score = stored.priority_score,
            "consultation booked"
        );

        self.log_activity(NewActivity::consultation_booked(&stored));
        Ok(stored)
    }

    /// Move a consultation along its lifecycle; derived fields are left untouched.
    pub fn update_status(
        &self,
        id: &ConsultationId,
        status: ConsultationStatus,
        admin_notes: Option<String>,
    ) -> Result<ConsultationRecord, ConsultationServiceError> {
        let current = self.get(id)?;
        if !current.status.can_transition_to(status) {
            return Err(ConsultationServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let patch = ConsultationPatch {
            status,
            updated_at: Utc::now(),
            admin_notes: admin_notes.and_then(normalize_optional),
        };
        let updated = self.repository.update(id, patch)?;
        info!(
            consultation_id = %id,
            from = current.status.label(),
            to = updated.status.label(),
            "consultation status updated"
        );

        self.log_activity(NewActivity::consultation_status_changed(
            &updated,
            current.status,
        ));
        Ok(updated)
    }

    pub fn get(&self, id: &ConsultationId) -> Result<ConsultationRecord, ConsultationServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(
        &self,
        filter: &ConsultationFilter,
        order: ConsultationOrder,
    ) -> Result<Vec<ConsultationRecord>, ConsultationServiceError> {
        Ok(self.repository.query(filter, order)?)
    }

    pub fn delete(&self, id: &ConsultationId) -> Result<(), ConsultationServiceError> {
        let record = self.get(id)?;
        self.repository.delete(id)?;
        info!(consultation_id = %id, "consultation deleted");

        self.log_activity(NewActivity::consultation_deleted(id, &record.full_name()));
        Ok(())
    }

    pub fn stats(&self) -> Result<ConsultationStats, ConsultationServiceError> {
        let records = self
            .repository
            .query(&ConsultationFilter::default(), ConsultationOrder::NewestFirst)?;
        Ok(ConsultationStats::from_records(&records))
    }

    /// Open requests (pending or confirmed) by preferred date, soonest first.
    pub fn upcoming(&self) -> Result<Vec<ConsultationRecord>, ConsultationServiceError> {
        let open = ConsultationFilter::with_statuses([
            ConsultationStatus::Pending,
            ConsultationStatus::Confirmed,
        ]);
        let mut records = self
            .repository
            .query(&open, ConsultationOrder::PreferredDate)?;
        records.truncate(UPCOMING_LIMIT);
        Ok(records)
    }

    /// A failed log write never fails the primary operation.
    fn log_activity(&self, activity: NewActivity) {
        let kind = activity.kind;
        if let Err(error) = self.activity.append(activity) {
            warn!(?kind, %error, "activity log write failed");
        }
    }
}

fn assemble_record(
    form: ConsultationForm,
    intake: ValidatedIntake,
    assessment: &LeadAssessment,
    consultation_id: ConsultationId,
    now: DateTime<Utc>,
) -> ConsultationRecord {
    ConsultationRecord {
        consultation_id,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: normalize_optional(form.phone),
        company: form.company.trim().to_string(),
        title: form.title.trim().to_string(),
        industry: form.industry,
        company_size: form.company_size,
        timezone: form.timezone,
        preferred_date: intake.preferred_date,
        preferred_time: form.preferred_time,
        secondary_date: normalize_optional(form.secondary_date),
        secondary_time: normalize_optional(form.secondary_time),
        urgency: form.urgency,
        current_challenges: form.current_challenges.trim().to_string(),
        ai_experience: normalize_optional(form.ai_experience),
        specific_interests: form.specific_interests.into_iter().collect(),
        hear_about_us: normalize_optional(form.hear_about_us),
        additional_notes: normalize_optional(form.additional_notes),
        status: ConsultationStatus::Pending,
        created_at: now,
        updated_at: None,
        admin_notes: None,
        estimated_value: assessment.estimated_value,
        priority_score: assessment.priority_score,
    }
}

fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Error raised by the consultation service.
#[derive(Debug, thiserror::Error)]
pub enum ConsultationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot move consultation from {from} to {to}")]
    InvalidTransition {
        from: ConsultationStatus,
        to: ConsultationStatus,
    },
}
