use chrono::{NaiveDate, Utc};
use consult_intake::workflows::activity::{
    ActivityEntry, ActivityFilter, ActivityId, ActivityLog, ActivityLogError, NewActivity,
};
use consult_intake::workflows::consultations::{
    ConsultationFilter, ConsultationId, ConsultationOrder, ConsultationPatch, ConsultationRecord,
    ConsultationRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConsultationRepository {
    records: Arc<Mutex<HashMap<ConsultationId, ConsultationRecord>>>,
}

impl ConsultationRepository for InMemoryConsultationRepository {
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
        match guard.get_mut(id) {
            Some(record) => {
                record.apply(&patch);
                Ok(record.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ConsultationRecord> = guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        order.sort(&mut records);
        Ok(records)
    }

    fn delete(&self, id: &ConsultationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Append-only feed with log-assigned ids, newest entries listed first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryActivityLog {
    next_id: Arc<AtomicU64>,
    entries: Arc<Mutex<Vec<ActivityEntry>>>,
}

impl ActivityLog for InMemoryActivityLog {
    fn append(&self, activity: NewActivity) -> Result<ActivityEntry, ActivityLogError> {
        let id = ActivityId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let entry = ActivityEntry::from_new(id, activity, Utc::now());
        let mut guard = self.entries.lock().expect("activity mutex poisoned");
        guard.push(entry.clone());
        Ok(entry)
    }

    fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, ActivityLogError> {
        let guard = self.entries.lock().expect("activity mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
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
        let position = guard
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ActivityLogError::NotFound)?;
        guard.remove(position);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_ids_are_assigned_in_order_and_listed_newest_first() {
        let log = InMemoryActivityLog::default();
        let first = log
            .append(NewActivity::note("Blog post live", "AI in local radio"))
            .expect("append");
        let second = log
            .append(NewActivity::note("Webinar booked", "April 12"))
            .expect("append");

        assert_eq!(first.id, ActivityId(1));
        assert_eq!(second.id, ActivityId(2));

        let listed = log.list(&ActivityFilter::default()).expect("list");
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn deleting_unknown_activity_is_not_found() {
        let log = InMemoryActivityLog::default();
        assert!(matches!(
            log.delete(ActivityId(9)),
            Err(ActivityLogError::NotFound)
        ));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date("2026-04-01").is_ok());
        let err = parse_date("April 1").expect_err("not iso");
        assert!(err.contains("YYYY-MM-DD"));
    }
}
