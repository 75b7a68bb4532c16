use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use super::domain::{ActivityEntry, ActivityFilter, ActivityId, ActivityStats, NewActivity};
use super::store::{ActivityLog, ActivityLogError};

/// Admin-facing operations over the activity log.
pub struct ActivityFeed<L> {
    log: Arc<L>,
}

impl<L> ActivityFeed<L>
where
    L: ActivityLog + 'static,
{
    pub fn new(log: Arc<L>) -> Self {
        Self { log }
    }

    pub fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, ActivityFeedError> {
        Ok(self.log.list(filter)?)
    }

    /// Manually add an entry (notes, speaking engagements, published content).
    pub fn record(&self, activity: NewActivity) -> Result<ActivityEntry, ActivityFeedError> {
        if activity.title.trim().is_empty() {
            return Err(ActivityFeedError::MissingTitle);
        }
        Ok(self.log.append(activity)?)
    }

    pub fn complete(&self, id: ActivityId) -> Result<ActivityEntry, ActivityFeedError> {
        Ok(self.log.mark_completed(id)?)
    }

    pub fn delete(&self, id: ActivityId) -> Result<(), ActivityFeedError> {
        Ok(self.log.delete(id)?)
    }

    pub fn stats<Tz: TimeZone>(
        &self,
        now: DateTime<Tz>,
    ) -> Result<ActivityStats, ActivityFeedError> {
        let entries = self.log.list(&ActivityFilter::default())?;
        Ok(ActivityStats::from_entries(&entries, now))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityFeedError {
    #[error("activity title is required")]
    MissingTitle,
    #[error(transparent)]
    Log(#[from] ActivityLogError),
}
