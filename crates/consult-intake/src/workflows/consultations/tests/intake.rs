use super::common::*;
use crate::workflows::consultations::intake::{is_email_shaped, parse_form_date};
use crate::workflows::consultations::{validate, ConsultationForm, IntakeField};

#[test]
fn complete_form_passes_and_yields_parsed_date() {
    let intake = validate(&form(), today()).expect("valid form");
    assert_eq!(intake.preferred_date.to_string(), "2026-03-10");
}

#[test]
fn every_failure_is_reported_in_one_pass() {
    let submission = ConsultationForm {
        first_name: String::new(),
        email: String::new(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("two fields missing");
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec![IntakeField::FirstName, IntakeField::Email]
    );
    assert_eq!(
        errors.get(IntakeField::FirstName),
        Some("First name is required")
    );
}

#[test]
fn empty_form_flags_each_required_field() {
    let errors = validate(&ConsultationForm::default(), today()).expect_err("empty form");
    assert_eq!(errors.len(), 11);
    assert!(!errors.contains(IntakeField::Phone));
    assert_eq!(
        errors.get(IntakeField::CurrentChallenges),
        Some("Please describe your current challenges")
    );
}

#[test]
fn whitespace_only_values_count_as_missing() {
    let submission = ConsultationForm {
        company: "   ".to_string(),
        current_challenges: "\n\t".to_string(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("blank values");
    assert!(errors.contains(IntakeField::Company));
    assert!(errors.contains(IntakeField::CurrentChallenges));
    assert_eq!(errors.len(), 2);
}

#[test]
fn malformed_email_gets_format_message() {
    let submission = ConsultationForm {
        email: "not-an-email".to_string(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("bad email");
    assert_eq!(
        errors.get(IntakeField::Email),
        Some("Please enter a valid email address")
    );
}

#[test]
fn missing_email_gets_only_required_message() {
    let submission = ConsultationForm {
        email: "  ".to_string(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("blank email");
    assert_eq!(errors.get(IntakeField::Email), Some("Email is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn email_shape_rules() {
    assert!(is_email_shaped("a@b.co"));
    assert!(is_email_shaped("first.last@sub.example.org"));
    assert!(!is_email_shaped("a@b"));
    assert!(!is_email_shaped("@example.com"));
    assert!(!is_email_shaped("a@@example.com"));
    assert!(!is_email_shaped("a b@example.com"));
    assert!(!is_email_shaped("a@.com"));
    assert!(!is_email_shaped("a@example."));
}

#[test]
fn phone_is_optional_but_checked_when_present() {
    let without_phone = ConsultationForm {
        phone: String::new(),
        ..form()
    };
    assert!(validate(&without_phone, today()).is_ok());

    let short_phone = ConsultationForm {
        phone: "555-0142".to_string(),
        ..form()
    };
    let errors = validate(&short_phone, today()).expect_err("short phone");
    assert_eq!(
        errors.get(IntakeField::Phone),
        Some("Please enter a valid phone number")
    );

    let exact_phone = ConsultationForm {
        phone: "5155550142".to_string(),
        ..form()
    };
    assert!(validate(&exact_phone, today()).is_ok());
}

#[test]
fn preferred_date_today_is_accepted() {
    let submission = ConsultationForm {
        preferred_date: "2026-03-02".to_string(),
        ..form()
    };
    assert!(validate(&submission, today()).is_ok());
}

#[test]
fn preferred_date_in_the_past_is_rejected() {
    let submission = ConsultationForm {
        preferred_date: "2026-03-01".to_string(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("past date");
    assert_eq!(
        errors.get(IntakeField::PreferredDate),
        Some("Please select a future date")
    );
}

#[test]
fn unparseable_date_is_rejected() {
    let submission = ConsultationForm {
        preferred_date: "next tuesday".to_string(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("garbage date");
    assert_eq!(
        errors.get(IntakeField::PreferredDate),
        Some("Please enter a valid date")
    );
}

#[test]
fn form_dates_accept_rfc3339_timestamps() {
    let parsed = parse_form_date("2026-03-10T09:00:00Z").expect("timestamp parses");
    assert_eq!(parsed.to_string(), "2026-03-10");
    assert!(parse_form_date("10/03/2026").is_none());
}

#[test]
fn errors_serialize_as_field_keyed_map() {
    let submission = ConsultationForm {
        title: String::new(),
        ..form()
    };

    let errors = validate(&submission, today()).expect_err("missing title");
    let json = serde_json::to_value(&errors).expect("serializes");
    assert_eq!(json["title"], "Title is required");
    assert_eq!(
        errors.to_string(),
        "submission has 1 invalid field(s): title"
    );
}
