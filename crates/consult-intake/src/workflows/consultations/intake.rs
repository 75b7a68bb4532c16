use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::ConsultationForm;

const MIN_PHONE_LEN: usize = 10;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    Title,
    Industry,
    CompanySize,
    Timezone,
    PreferredDate,
    PreferredTime,
    CurrentChallenges,
}

impl IntakeField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Title => "title",
            Self::Industry => "industry",
            Self::CompanySize => "company_size",
            Self::Timezone => "timezone",
            Self::PreferredDate => "preferred_date",
            Self::PreferredTime => "preferred_time",
            Self::CurrentChallenges => "current_challenges",
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Email => "Email is required",
            Self::Phone => "Phone is required",
            Self::Company => "Company is required",
            Self::Title => "Title is required",
            Self::Industry => "Industry is required",
            Self::CompanySize => "Company size is required",
            Self::Timezone => "Timezone is required",
            Self::PreferredDate => "Preferred date is required",
            Self::PreferredTime => "Preferred time is required",
            Self::CurrentChallenges => "Please describe your current challenges",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-keyed validation failures collected in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<IntakeField, String>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "submission has {} invalid field(s): {}",
            self.0.len(),
            self.field_list()
        )
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: IntakeField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: IntakeField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = IntakeField> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: IntakeField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    fn field_list(&self) -> String {
        self.0
            .keys()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Values the validator had to parse on the way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedIntake {
    pub preferred_date: NaiveDate,
}

/// Check a raw form against the booking rules, relative to `today`.
pub fn validate(
    form: &ConsultationForm,
    today: NaiveDate,
) -> Result<ValidatedIntake, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let required = [
        (IntakeField::FirstName, &form.first_name),
        (IntakeField::LastName, &form.last_name),
        (IntakeField::Email, &form.email),
        (IntakeField::Company, &form.company),
        (IntakeField::Title, &form.title),
        (IntakeField::Industry, &form.industry),
        (IntakeField::CompanySize, &form.company_size),
        (IntakeField::Timezone, &form.timezone),
        (IntakeField::PreferredDate, &form.preferred_date),
        (IntakeField::PreferredTime, &form.preferred_time),
        (IntakeField::CurrentChallenges, &form.current_challenges),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.insert(field, field.required_message());
        }
    }

    let email = form.email.trim();
    if !email.is_empty() && !is_email_shaped(email) {
        errors.insert(IntakeField::Email, "Please enter a valid email address");
    }

    let phone = form.phone.trim();
    if !phone.is_empty() && phone.chars().count() < MIN_PHONE_LEN {
        errors.insert(IntakeField::Phone, "Please enter a valid phone number");
    }

    let mut preferred_date = None;
    let raw_date = form.preferred_date.trim();
    if !raw_date.is_empty() {
        match parse_form_date(raw_date) {
            Some(date) if date < today => {
                errors.insert(IntakeField::PreferredDate, "Please select a future date");
            }
            Some(date) => preferred_date = Some(date),
            None => {
                errors.insert(IntakeField::PreferredDate, "Please enter a valid date");
            }
        }
    }

    match preferred_date {
        Some(preferred_date) if errors.is_empty() => Ok(ValidatedIntake { preferred_date }),
        _ => Err(errors),
    }
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain part.
pub fn is_email_shaped(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; time of day is dropped.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
