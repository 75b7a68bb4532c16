use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ConsultationId, ConsultationPatch, ConsultationRecord, ConsultationStatus};

/// Storage abstraction over the consultation-requests collection.
pub trait ConsultationRepository: Send + Sync {
    fn insert(&self, record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError>;
    fn update(
        &self,
        id: &ConsultationId,
        patch: ConsultationPatch,
    ) -> Result<ConsultationRecord, RepositoryError>;
    fn fetch(&self, id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError>;
    fn query(
        &self,
        filter: &ConsultationFilter,
        order: ConsultationOrder,
    ) -> Result<Vec<ConsultationRecord>, RepositoryError>;
    fn delete(&self, id: &ConsultationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Server-side filter for consultation queries. Empty fields match everything; a
/// non-empty `statuses` matches any of the listed statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultationFilter {
    pub statuses: Vec<ConsultationStatus>,
    pub urgency: Option<String>,
    pub industry: Option<String>,
    pub search: Option<String>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

impl ConsultationFilter {
    pub fn with_status(status: ConsultationStatus) -> Self {
        Self::with_statuses([status])
    }

    pub fn with_statuses(statuses: impl IntoIterator<Item = ConsultationStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &ConsultationRecord) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status) {
            return false;
        }

        if let Some(urgency) = non_blank(&self.urgency) {
            if !record.urgency.eq_ignore_ascii_case(urgency) {
                return false;
            }
        }

        if let Some(industry) = non_blank(&self.industry) {
            if !contains_ignore_case(&record.industry, industry) {
                return false;
            }
        }

        if let Some(term) = non_blank(&self.search) {
            let hit = [
                &record.first_name,
                &record.last_name,
                &record.company,
                &record.email,
            ]
            .into_iter()
            .any(|field| contains_ignore_case(field, term));
            if !hit {
                return false;
            }
        }

        let created_on = record.created_at.date_naive();
        if self.created_from.is_some_and(|from| created_on < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| created_on > to) {
            return false;
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort order requested from the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationOrder {
    #[default]
    NewestFirst,
    PreferredDate,
    HighestPriority,
}

impl ConsultationOrder {
    pub fn sort(self, records: &mut [ConsultationRecord]) {
        match self {
            Self::NewestFirst => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::PreferredDate => records.sort_by(|a, b| {
                a.preferred_date
                    .cmp(&b.preferred_date)
                    .then_with(|| a.created_at.cmp(&b.created_at))
            }),
            Self::HighestPriority => records.sort_by(|a, b| {
                b.priority_score
                    .cmp(&a.priority_score)
                    .then_with(|| b.estimated_value.cmp(&a.estimated_value))
            }),
        }
    }
}

/// Dashboard counters over a set of consultations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub total_value: u64,
}

impl ConsultationStats {
    pub fn from_records(records: &[ConsultationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.status {
                ConsultationStatus::Pending => stats.pending += 1,
                ConsultationStatus::Confirmed => stats.confirmed += 1,
                ConsultationStatus::Completed => stats.completed += 1,
                ConsultationStatus::Rejected | ConsultationStatus::Cancelled => {}
            }
            stats.total_value = stats.total_value.saturating_add(record.estimated_value);
            stats
        })
    }
}
