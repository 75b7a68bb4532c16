//! Best-effort audit trail of consultation changes plus manually recorded admin notes.

pub mod domain;
mod events;
mod feed;
mod store;
pub mod router;

pub use domain::{
    ActivityColor, ActivityEntry, ActivityFilter, ActivityIcon, ActivityId, ActivityKind,
    ActivityStats, NewActivity,
};
pub use feed::{ActivityFeed, ActivityFeedError};
pub use store::{ActivityLog, ActivityLogError};
pub use router::{activity_router, ActivityApi};
