use crate::infra::{InMemoryActivityLog, InMemoryConsultationRepository};
use chrono::{Duration, Local, NaiveDate, Utc};
use clap::Args;
use consult_intake::error::AppError;
use consult_intake::workflows::activity::{ActivityFeed, ActivityFilter};
use consult_intake::workflows::consultations::{
    CompanySize, ConsultationFilter, ConsultationForm, ConsultationOrder, ConsultationService,
    ConsultationStatus, LeadAssessment, LeadScorer, LeadSignals, Urgency,
};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Company size bucket, e.g. `51-100` or `51-100 employees`
    #[arg(long)]
    pub(crate) company_size: String,
    /// Urgency level: low, medium, or high
    #[arg(long, default_value = "medium")]
    pub(crate) urgency: String,
    /// Interest tag; repeat for each selected tag
    #[arg(long)]
    pub(crate) interest: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Booking date used for the date check (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let assessment = score_profile(&args)?;
    let breakdown = &assessment.breakdown;

    println!("Lead assessment");
    println!("- Estimated value: ${}", assessment.estimated_value);
    println!("- Priority score: {}/100", assessment.priority_score);
    println!(
        "  Value weights: size x{:.1} | urgency x{:.1} | interests x{:.1}",
        breakdown.size_multiplier, breakdown.urgency_multiplier, breakdown.interest_multiplier
    );
    println!(
        "  Priority points: base 50 + urgency {} + size {} + interests {}",
        breakdown.urgency_points, breakdown.size_points, breakdown.interest_points
    );
    Ok(())
}

fn score_profile(args: &ScoreArgs) -> Result<LeadAssessment, AppError> {
    let company_size = CompanySize::from_label(&args.company_size).ok_or_else(|| {
        let options: Vec<&str> = CompanySize::ordered()
            .into_iter()
            .map(CompanySize::bucket)
            .collect();
        AppError::Usage(format!(
            "unknown company size `{}` (expected one of {})",
            args.company_size,
            options.join(", ")
        ))
    })?;
    let urgency = Urgency::from_label(&args.urgency).ok_or_else(|| {
        AppError::Usage(format!(
            "unknown urgency `{}` (expected low, medium, or high)",
            args.urgency
        ))
    })?;
    let interests: BTreeSet<&str> = args.interest.iter().map(|tag| tag.trim()).collect();

    Ok(LeadScorer::new().assess(LeadSignals {
        company_size: Some(company_size),
        urgency: Some(urgency),
        interest_count: interests.len(),
    }))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(InMemoryConsultationRepository::default());
    let log = Arc::new(InMemoryActivityLog::default());
    let service = ConsultationService::new(repository, log.clone());
    let feed = ActivityFeed::new(log);

    println!("Consultation intake demo ({today})");

    let mut booked = Vec::new();
    for (offset, form) in demo_forms(today).into_iter().enumerate() {
        let submitted_at = Utc::now() + Duration::milliseconds(offset as i64);
        match service.submit_on(form, today, submitted_at) {
            Ok(record) => {
                println!(
                    "- Booked {} for {} ({}) on {} at {}",
                    record.consultation_id,
                    record.full_name(),
                    record.company,
                    record.preferred_date,
                    record.preferred_time
                );
                println!(
                    "  estimated value ${} | priority {}/100 | urgency {}",
                    record.estimated_value, record.priority_score, record.urgency
                );
                booked.push(record);
            }
            Err(err) => println!("- Submission rejected: {err}"),
        }
    }

    if let Some(first) = booked.first() {
        let confirmed = service.update_status(
            &first.consultation_id,
            ConsultationStatus::Confirmed,
            Some("Discovery call scheduled".to_string()),
        )?;
        println!(
            "- {} moved to {}",
            confirmed.consultation_id, confirmed.status
        );
    }

    let stats = service.stats()?;
    println!("\nPipeline");
    println!(
        "- {} total | {} pending | {} confirmed | {} completed | ${} estimated",
        stats.total, stats.pending, stats.confirmed, stats.completed, stats.total_value
    );

    println!("Highest priority");
    for record in service.list(
        &ConsultationFilter::default(),
        ConsultationOrder::HighestPriority,
    )? {
        println!(
            "  - {:>3} {} ({})",
            record.priority_score,
            record.full_name(),
            record.company
        );
    }

    println!("Upcoming");
    for record in service.upcoming()? {
        println!(
            "  - {} {} with {} [{}]",
            record.preferred_date,
            record.preferred_time,
            record.full_name(),
            record.status
        );
    }

    let activity_stats = feed.stats(Local::now())?;
    println!("\nActivity feed");
    println!(
        "- {} today | {} this week | {} pending actions | {} urgent",
        activity_stats.today,
        activity_stats.this_week,
        activity_stats.pending_actions,
        activity_stats.urgent_items
    );
    for entry in feed.list(&ActivityFilter::default())? {
        let marker = if entry.follow_up { "!" } else { " " };
        println!("  {marker} [{}] {}", entry.kind.label(), entry.title);
    }

    Ok(())
}

fn demo_forms(today: NaiveDate) -> Vec<ConsultationForm> {
    let date = |days: i64| (today + Duration::days(days)).format("%Y-%m-%d").to_string();

    vec![
        ConsultationForm {
            first_name: "Marcus".to_string(),
            last_name: "Bell".to_string(),
            email: "marcus.bell@northwind-broadcast.example".to_string(),
            phone: "+1 312 555 0188".to_string(),
            company: "Northwind Broadcasting".to_string(),
            title: "VP Operations".to_string(),
            industry: "Broadcasting".to_string(),
            company_size: CompanySize::Enterprise.label(),
            timezone: "Central Time (CT)".to_string(),
            preferred_date: date(3),
            preferred_time: "10:00 AM".to_string(),
            urgency: Urgency::High.label().to_string(),
            current_challenges: "Regional newsrooms duplicate the same scripts by hand."
                .to_string(),
            specific_interests: tags(&[
                "Content Automation",
                "Workflow Optimization",
                "Cost Reduction",
            ]),
            hear_about_us: "Referral".to_string(),
            ..ConsultationForm::default()
        },
        ConsultationForm {
            first_name: "Ines".to_string(),
            last_name: "Moreau".to_string(),
            email: "ines@paperlantern.example".to_string(),
            company: "Paper Lantern Press".to_string(),
            title: "Publisher".to_string(),
            industry: "Publishing".to_string(),
            company_size: CompanySize::Small.label(),
            timezone: "Central European Time (CET)".to_string(),
            preferred_date: date(9),
            preferred_time: "3:00 PM".to_string(),
            urgency: Urgency::Low.label().to_string(),
            current_challenges: "Exploring where AI fits in editorial review.".to_string(),
            ai_experience: "Tried a chatbot for marketing copy".to_string(),
            specific_interests: tags(&["Team Training"]),
            ..ConsultationForm::default()
        },
        ConsultationForm {
            first_name: "Theo".to_string(),
            last_name: "Nakamura".to_string(),
            email: "theo@".to_string(),
            company: "Signal Path Podcasts".to_string(),
            title: "Founder".to_string(),
            industry: "Podcasting".to_string(),
            company_size: CompanySize::Micro.label(),
            timezone: "Pacific Time (PT)".to_string(),
            preferred_date: date(-1),
            preferred_time: "9:00 AM".to_string(),
            current_challenges: "Editing backlog.".to_string(),
            ..ConsultationForm::default()
        },
    ]
}

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|tag| tag.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_intake::workflows::consultations::validate;

    fn score_args(size: &str, urgency: &str, interests: &[&str]) -> ScoreArgs {
        ScoreArgs {
            company_size: size.to_string(),
            urgency: urgency.to_string(),
            interest: interests.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn score_profile_matches_reference_lead() {
        let assessment = score_profile(&score_args(
            "51-100 employees",
            "medium",
            &["Content Automation", "Personalization"],
        ))
        .expect("known labels");

        assert_eq!(assessment.estimated_value, 60_000);
        assert_eq!(assessment.priority_score, 89);
    }

    #[test]
    fn duplicate_interest_flags_count_once() {
        let assessment = score_profile(&score_args(
            "1-10",
            "low",
            &["Cost Reduction", "Cost Reduction "],
        ))
        .expect("known labels");

        assert_eq!(assessment.breakdown.interest_points, 2);
    }

    #[test]
    fn score_profile_rejects_unknown_labels() {
        let err = score_profile(&score_args("huge", "medium", &[])).expect_err("bad size");
        assert!(matches!(err, AppError::Usage(_)));

        let err = score_profile(&score_args("1000+", "asap", &[])).expect_err("bad urgency");
        assert!(err.to_string().contains("asap"));
    }

    #[test]
    fn demo_forms_cover_accepted_and_rejected_bookings() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date");
        let outcomes: Vec<bool> = demo_forms(today)
            .iter()
            .map(|form| validate(form, today).is_ok())
            .collect();
        assert_eq!(outcomes, vec![true, true, false]);
    }

    #[test]
    fn demo_runs_end_to_end() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date");
        run_demo(DemoArgs { today: Some(today) }).expect("demo completes");
    }
}
