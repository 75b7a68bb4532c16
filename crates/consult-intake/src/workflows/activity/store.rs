use super::domain::{ActivityEntry, ActivityFilter, ActivityId, NewActivity};

/// Append-mostly store behind the admin activity feed.
pub trait ActivityLog: Send + Sync {
    fn append(&self, activity: NewActivity) -> Result<ActivityEntry, ActivityLogError>;
    /// Matching entries, newest first.
    fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, ActivityLogError>;
    fn mark_completed(&self, id: ActivityId) -> Result<ActivityEntry, ActivityLogError>;
    fn delete(&self, id: ActivityId) -> Result<(), ActivityLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityLogError {
    #[error("activity entry not found")]
    NotFound,
    #[error("activity log unavailable: {0}")]
    Unavailable(String),
}
