use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for booked consultations (`CONS-<millis>-<suffix>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsultationId(pub String);

const ID_PREFIX: &str = "CONS";
const ID_SUFFIX_LEN: usize = 9;
const ID_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl ConsultationId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now().timestamp_millis(), &mut rand::thread_rng())
    }

    /// Collisions are not checked before insert.
    pub fn generate_at<R: Rng + ?Sized>(epoch_millis: i64, rng: &mut R) -> Self {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..ID_SUFFIX_ALPHABET.len());
                ID_SUFFIX_ALPHABET[idx] as char
            })
            .collect();
        Self(format!("{ID_PREFIX}-{epoch_millis}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw booking form as submitted by a prospect. Every field is a plain string so the
/// validator can report on exactly what was typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsultationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub title: String,
    pub industry: String,
    pub company_size: String,
    pub timezone: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub secondary_date: String,
    pub secondary_time: String,
    pub urgency: String,
    pub current_challenges: String,
    pub ai_experience: String,
    pub specific_interests: BTreeSet<String>,
    pub hear_about_us: String,
    pub additional_notes: String,
}

impl Default for ConsultationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            title: String::new(),
            industry: String::new(),
            company_size: String::new(),
            timezone: String::new(),
            preferred_date: String::new(),
            preferred_time: String::new(),
            secondary_date: String::new(),
            secondary_time: String::new(),
            urgency: Urgency::Medium.label().to_string(),
            current_challenges: String::new(),
            ai_experience: String::new(),
            specific_interests: BTreeSet::new(),
            hear_about_us: String::new(),
            additional_notes: String::new(),
        }
    }
}

impl ConsultationForm {
    pub fn interest_count(&self) -> usize {
        self.specific_interests.len()
    }
}

/// Self-reported buyer urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Head-count buckets offered on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-100")]
    Medium,
    #[serde(rename = "101-500")]
    Large,
    #[serde(rename = "501-1000")]
    Enterprise,
    #[serde(rename = "1000+")]
    Global,
}

impl CompanySize {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Micro,
            Self::Small,
            Self::Medium,
            Self::Large,
            Self::Enterprise,
            Self::Global,
        ]
    }

    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Micro => "1-10",
            Self::Small => "11-50",
            Self::Medium => "51-100",
            Self::Large => "101-500",
            Self::Enterprise => "501-1000",
            Self::Global => "1000+",
        }
    }

    pub fn label(self) -> String {
        format!("{} employees", self.bucket())
    }

    /// Accepts both the bare bucket (`51-100`) and the form label (`51-100 employees`).
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let bucket = trimmed
            .strip_suffix("employees")
            .map(str::trim_end)
            .unwrap_or(trimmed);
        Self::ordered()
            .into_iter()
            .find(|size| size.bucket() == bucket)
    }
}

pub const INDUSTRIES: [&str; 11] = [
    "Broadcasting",
    "Digital Media",
    "Publishing",
    "Newspapers",
    "Radio",
    "Television",
    "Streaming",
    "Podcasting",
    "Content Creation",
    "Marketing Agency",
    "Other",
];

pub const TIMEZONES: [&str; 8] = [
    "Pacific Time (PT)",
    "Mountain Time (MT)",
    "Central Time (CT)",
    "Eastern Time (ET)",
    "GMT/UTC",
    "Central European Time (CET)",
    "Asia Pacific (APAC)",
    "Other",
];

pub const TIME_SLOTS: [&str; 9] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

pub const INTEREST_TAGS: [&str; 9] = [
    "Content Automation",
    "Audience Analytics",
    "Personalization",
    "Content Creation",
    "Workflow Optimization",
    "Cost Reduction",
    "Revenue Growth",
    "Competitive Advantage",
    "Team Training",
];

/// Option lists rendered by the booking form.
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub industries: Vec<&'static str>,
    pub company_sizes: Vec<String>,
    pub timezones: Vec<&'static str>,
    pub time_slots: Vec<&'static str>,
    pub urgencies: Vec<&'static str>,
    pub interests: Vec<&'static str>,
}

impl FormOptions {
    pub fn standard() -> Self {
        Self {
            industries: INDUSTRIES.to_vec(),
            company_sizes: CompanySize::ordered()
                .into_iter()
                .map(CompanySize::label)
                .collect(),
            timezones: TIMEZONES.to_vec(),
            time_slots: TIME_SLOTS.to_vec(),
            urgencies: Urgency::ordered().into_iter().map(Urgency::label).collect(),
            interests: INTEREST_TAGS.to_vec(),
        }
    }
}

/// Lifecycle of a booked consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Pending,
    Confirmed,
    Completed,
    Rejected,
    Cancelled,
}

impl ConsultationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// `pending -> confirmed -> completed`; any open request may be rejected or cancelled.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Confirmed) | (Self::Confirmed, Self::Completed) => true,
            (current, Self::Rejected | Self::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stored consultation. The derived `estimated_value` and `priority_score` are written
/// once at assembly; `ConsultationPatch` is the only update path and cannot touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub consultation_id: ConsultationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: String,
    pub title: String,
    pub industry: String,
    pub company_size: String,
    pub timezone: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub secondary_date: Option<String>,
    pub secondary_time: Option<String>,
    pub urgency: String,
    pub current_challenges: String,
    pub ai_experience: Option<String>,
    pub specific_interests: Vec<String>,
    pub hear_about_us: Option<String>,
    pub additional_notes: Option<String>,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    pub estimated_value: u64,
    pub priority_score: u8,
}

impl ConsultationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn apply(&mut self, patch: &ConsultationPatch) {
        self.status = patch.status;
        self.updated_at = Some(patch.updated_at);
        if let Some(notes) = &patch.admin_notes {
            self.admin_notes = Some(notes.clone());
        }
    }

    pub fn summary(&self) -> ConsultationSummary {
        ConsultationSummary {
            consultation_id: self.consultation_id.clone(),
            name: self.full_name(),
            email: self.email.clone(),
            company: self.company.clone(),
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time.clone(),
            status: self.status.label(),
            estimated_value: self.estimated_value,
            priority_score: self.priority_score,
        }
    }
}

/// Admin-side mutation of a stored consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationPatch {
    pub status: ConsultationStatus,
    pub updated_at: DateTime<Utc>,
    pub admin_notes: Option<String>,
}

/// Confirmation payload returned after booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationSummary {
    pub consultation_id: ConsultationId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub status: &'static str,
    pub estimated_value: u64,
    pub priority_score: u8,
}
