use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::AdminConfig;
use crate::workflows::activity::{
    ActivityEntry, ActivityFilter, ActivityId, ActivityLog, ActivityLogError, NewActivity,
};
use crate::workflows::admin::AdminSessions;
use crate::workflows::consultations::domain::{
    ConsultationForm, ConsultationId, ConsultationPatch, ConsultationRecord,
};
use crate::workflows::consultations::repository::{
    ConsultationFilter, ConsultationOrder, ConsultationRepository, RepositoryError,
};
use crate::workflows::consultations::ConsultationService;

pub(crate) const ADMIN_EMAIL: &str = "owner@studio.example";
pub(crate) const ADMIN_PASSWORD: &str = "correct horse battery";

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn form() -> ConsultationForm {
    ConsultationForm {
        first_name: "Dana".to_string(),
        last_name: "Okafor".to_string(),
        email: "dana@riverside-media.example".to_string(),
        phone: "+1 515 555 0142".to_string(),
        company: "Riverside Media".to_string(),
        title: "Head of Digital".to_string(),
        industry: "Digital Media".to_string(),
        company_size: "51-100 employees".to_string(),
        timezone: "Central Time (CT)".to_string(),
        preferred_date: "2026-03-10".to_string(),
        preferred_time: "10:00 AM".to_string(),
        secondary_date: String::new(),
        secondary_time: "  ".to_string(),
        urgency: "medium".to_string(),
        current_challenges: "Newsroom output is flat while headcount shrinks.".to_string(),
        ai_experience: String::new(),
        specific_interests: ["Content Automation", "Personalization"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        hear_about_us: "Conference talk".to_string(),
        additional_notes: String::new(),
    }
}

pub(crate) fn form_with(size: &str, urgency: &str, interests: &[&str]) -> ConsultationForm {
    ConsultationForm {
        company_size: size.to_string(),
        urgency: urgency.to_string(),
        specific_interests: interests.iter().map(|tag| tag.to_string()).collect(),
        ..form()
    }
}

pub(crate) fn build_service() -> (
    ConsultationService<MemoryRepository, MemoryActivityLog>,
    Arc<MemoryRepository>,
    Arc<MemoryActivityLog>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let activity = Arc::new(MemoryActivityLog::default());
    let service = ConsultationService::new(repository.clone(), activity.clone());
    (service, repository, activity)
}

pub(crate) fn admin_sessions() -> Arc<AdminSessions> {
    Arc::new(AdminSessions::new(AdminConfig {
        email: ADMIN_EMAIL.to_string(),
        password: Some(ADMIN_PASSWORD.to_string()),
    }))
}

pub(crate) fn bearer(sessions: &AdminSessions) -> String {
    let session = sessions
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .expect("admin login");
    format!("Bearer {}", session.token.as_str())
}

#[derive(Default, Clone)]
pub(crate) struct MemoryRepository {
    pub(crate) records: Arc<Mutex<HashMap<ConsultationId, ConsultationRecord>>>,
    last_filter: Arc<Mutex<Option<ConsultationFilter>>>,
}

impl MemoryRepository {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }

    pub(crate) fn last_filter(&self) -> Option<ConsultationFilter> {
        self.last_filter
            .lock()
            .expect("filter mutex poisoned")
            .clone()
    }
}

impl ConsultationRepository for MemoryRepository {
    fn insert(&self, record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.consultation_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.consultation_id.clone(), record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: &ConsultationId,
        patch: ConsultationPatch,
    ) -> Result<ConsultationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.apply(&patch);
        Ok(record.clone())
    }

    fn fetch(&self, id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn query(
        &self,
        filter: &ConsultationFilter,
        order: ConsultationOrder,
    ) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        *self.last_filter.lock().expect("filter mutex poisoned") = Some(filter.clone());
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        order.sort(&mut records);
        Ok(records)
    }

    fn delete(&self, id: &ConsultationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(crate) struct UnavailableRepository;

impl ConsultationRepository for UnavailableRepository {
    fn insert(&self, _record: ConsultationRecord) -> Result<ConsultationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: &ConsultationId,
        _patch: ConsultationPatch,
    ) -> Result<ConsultationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ConsultationId) -> Result<Option<ConsultationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn query(
        &self,
        _filter: &ConsultationFilter,
        _order: ConsultationOrder,
    ) -> Result<Vec<ConsultationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ConsultationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryActivityLog {
    entries: Arc<Mutex<Vec<ActivityEntry>>>,
}

impl MemoryActivityLog {
    pub(crate) fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().expect("activity mutex poisoned").clone()
    }

    pub(crate) fn seed(&self, entry: ActivityEntry) {
        self.entries
            .lock()
            .expect("activity mutex poisoned")
            .push(entry);
    }
}

impl ActivityLog for MemoryActivityLog {
    fn append(&self, activity: NewActivity) -> Result<ActivityEntry, ActivityLogError> {
        let mut guard = self.entries.lock().expect("activity mutex poisoned");
        let id = ActivityId(guard.len() as u64 + 1);
        let entry = ActivityEntry::from_new(id, activity, Utc::now());
        guard.push(entry.clone());
        Ok(entry)
    }

    fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, ActivityLogError> {
        let guard = self.entries.lock().expect("activity mutex poisoned");
        let mut entries: Vec<_> = guard
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    fn mark_completed(&self, id: ActivityId) -> Result<ActivityEntry, ActivityLogError> {
        let mut guard = self.entries.lock().expect("activity mutex poisoned");
        let entry = guard
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(ActivityLogError::NotFound)?;
        entry.completed = true;
        Ok(entry.clone())
    }

    fn delete(&self, id: ActivityId) -> Result<(), ActivityLogError> {
        let mut guard = self.entries.lock().expect("activity mutex poisoned");
        let before = guard.len();
        guard.retain(|entry| entry.id != id);
        if guard.len() == before {
            return Err(ActivityLogError::NotFound);
        }
        Ok(())
    }
}

pub(crate) struct UnavailableActivityLog;

impl ActivityLog for UnavailableActivityLog {
    fn append(&self, _activity: NewActivity) -> Result<ActivityEntry, ActivityLogError> {
        Err(ActivityLogError::Unavailable("log offline".to_string()))
    }

    fn list(&self, _filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, ActivityLogError> {
        Err(ActivityLogError::Unavailable("log offline".to_string()))
    }

    fn mark_completed(&self, _id: ActivityId) -> Result<ActivityEntry, ActivityLogError> {
        Err(ActivityLogError::Unavailable("log offline".to_string()))
    }

    fn delete(&self, _id: ActivityId) -> Result<(), ActivityLogError> {
        Err(ActivityLogError::Unavailable("log offline".to_string()))
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
