use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::consultations::ConsultationId;

/// Identifier assigned by the activity log on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ConsultationBooked,
    HighUrgencyBooking,
    ConsultationUpdated,
    ConsultationCompleted,
    ConsultationDeleted,
    ContentPublished,
    LeadConverted,
    SpeakingConfirmed,
    Note,
}

impl ActivityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConsultationBooked => "Consultation Booking",
            Self::HighUrgencyBooking => "High Urgency Booking",
            Self::ConsultationUpdated => "Consultation Update",
            Self::ConsultationCompleted => "Completed Consultation",
            Self::ConsultationDeleted => "Consultation Removed",
            Self::ContentPublished => "Content Published",
            Self::LeadConverted => "Lead Conversion",
            Self::SpeakingConfirmed => "Speaking Engagement",
            Self::Note => "Note",
        }
    }

    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::HighUrgencyBooking)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityIcon {
    Message,
    Calendar,
    Edit,
    Dollar,
    Award,
    Check,
    User,
    Tag,
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityColor {
    Blue,
    Green,
    Purple,
    Yellow,
    Red,
    Orange,
}

/// Entry as submitted to the log, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub icon: ActivityIcon,
    pub color: ActivityColor,
    #[serde(default)]
    pub actionable: bool,
    #[serde(default)]
    pub follow_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<ConsultationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl NewActivity {
    pub fn note(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ActivityKind::Note,
            title: title.into(),
            description: description.into(),
            icon: ActivityIcon::Message,
            color: ActivityColor::Blue,
            actionable: false,
            follow_up: false,
            consultation_id: None,
            value: None,
        }
    }
}

/// Stored activity log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub icon: ActivityIcon,
    pub color: ActivityColor,
    pub actionable: bool,
    pub follow_up: bool,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_id: Option<ConsultationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn from_new(id: ActivityId, activity: NewActivity, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: activity.kind,
            title: activity.title,
            description: activity.description,
            icon: activity.icon,
            color: activity.color,
            actionable: activity.actionable,
            follow_up: activity.follow_up,
            completed: false,
            consultation_id: activity.consultation_id,
            value: activity.value,
            timestamp,
        }
    }

    pub fn is_pending_action(&self) -> bool {
        self.actionable && !self.completed
    }
}

/// Filter applied when listing the feed. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    pub kind: Option<ActivityKind>,
    pub search: Option<String>,
}

impl ActivityFilter {
    pub fn matches(&self, entry: &ActivityEntry) -> bool {
        if self.kind.is_some_and(|kind| kind != entry.kind) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                entry.title.to_lowercase().contains(&term)
                    || entry.description.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}

/// Feed counters relative to `now`; weeks start on Sunday. Entries are bucketed by their
/// calendar day in `now`'s time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub today: usize,
    pub this_week: usize,
    pub pending_actions: usize,
    pub urgent_items: usize,
}

impl ActivityStats {
    pub fn from_entries<Tz: TimeZone>(entries: &[ActivityEntry], now: DateTime<Tz>) -> Self {
        let zone = now.timezone();
        let today = now.date_naive();
        let week_start =
            today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));

        entries.iter().fold(Self::default(), |mut stats, entry| {
            let day = entry.timestamp.with_timezone(&zone).date_naive();
            if day >= today {
                stats.today += 1;
            }
            if day >= week_start {
                stats.this_week += 1;
            }
            if entry.is_pending_action() {
                stats.pending_actions += 1;
                if entry.kind.is_urgent() {
                    stats.urgent_items += 1;
                }
            }
            stats
        })
    }
}
