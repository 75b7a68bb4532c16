use super::common::*;
use crate::workflows::consultations::scoring::{estimate_value, priority_score, MAX_SCORE};
use crate::workflows::consultations::{CompanySize, LeadScorer, LeadSignals, Urgency};

#[test]
fn zero_interest_values_follow_size_and_urgency_tables() {
    let sizes = [
        (CompanySize::Micro, 0.5),
        (CompanySize::Small, 0.8),
        (CompanySize::Medium, 1.0),
        (CompanySize::Large, 1.5),
        (CompanySize::Enterprise, 2.0),
        (CompanySize::Global, 3.0),
    ];
    let urgencies = [
        (Urgency::Low, 0.8),
        (Urgency::Medium, 1.0),
        (Urgency::High, 1.3),
    ];

    for (size, size_weight) in sizes {
        for (urgency, urgency_weight) in urgencies {
            let expected = (50_000.0_f64 * size_weight * urgency_weight).round() as u64;
            assert_eq!(
                estimate_value(Some(size), Some(urgency), 0),
                expected,
                "{size:?}/{urgency:?}"
            );
        }
    }
}

#[test]
fn mid_sized_medium_urgency_lead_with_two_interests() {
    let assessment = LeadScorer::new().assess_form(&form());
    assert_eq!(assessment.estimated_value, 60_000);
    assert_eq!(assessment.priority_score, 89);
    assert_eq!(assessment.breakdown.interest_points, 4);
}

#[test]
fn largest_urgent_lead_is_capped() {
    let interests = [
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
    let lead = form_with("1000+ employees", "high", &interests);
    let assessment = LeadScorer::new().assess_form(&lead);

    assert_eq!(assessment.priority_score, MAX_SCORE);
    assert_eq!(assessment.estimated_value, 370_500);
}

#[test]
fn priority_is_never_above_the_cap() {
    for size in CompanySize::ordered() {
        for urgency in Urgency::ordered() {
            for interests in 0..=20 {
                let score = priority_score(Some(size), Some(urgency), interests);
                assert!(score <= MAX_SCORE, "{size:?}/{urgency:?}/{interests}");
            }
        }
    }
}

#[test]
fn raising_urgency_never_lowers_either_figure() {
    for size in CompanySize::ordered() {
        for interests in [0, 3, 9] {
            let low = LeadScorer::new().assess(LeadSignals {
                company_size: Some(size),
                urgency: Some(Urgency::Low),
                interest_count: interests,
            });
            let medium = LeadScorer::new().assess(LeadSignals {
                company_size: Some(size),
                urgency: Some(Urgency::Medium),
                interest_count: interests,
            });
            let high = LeadScorer::new().assess(LeadSignals {
                company_size: Some(size),
                urgency: Some(Urgency::High),
                interest_count: interests,
            });

            assert!(low.estimated_value <= medium.estimated_value);
            assert!(medium.estimated_value <= high.estimated_value);
            assert!(low.priority_score <= medium.priority_score);
            assert!(medium.priority_score <= high.priority_score);
        }
    }
}

#[test]
fn larger_companies_never_score_lower() {
    let sizes = CompanySize::ordered();
    for pair in sizes.windows(2) {
        let smaller = pair[0];
        let larger = pair[1];
        assert!(
            estimate_value(Some(smaller), Some(Urgency::Medium), 1)
                <= estimate_value(Some(larger), Some(Urgency::Medium), 1)
        );
        assert!(
            priority_score(Some(smaller), Some(Urgency::Medium), 1)
                <= priority_score(Some(larger), Some(Urgency::Medium), 1)
        );
    }
}

#[test]
fn unrecognised_labels_fall_back_to_defaults() {
    let assessment = LeadScorer::new().assess_form(&form_with("a few of us", "whenever", &[]));

    assert_eq!(assessment.estimated_value, 50_000);
    assert_eq!(assessment.priority_score, 50);
    assert_eq!(assessment.breakdown.size_multiplier, 1.0);
    assert_eq!(assessment.breakdown.urgency_points, 0);
}

#[test]
fn company_size_accepts_bucket_or_label() {
    assert_eq!(
        CompanySize::from_label("101-500"),
        Some(CompanySize::Large)
    );
    assert_eq!(
        CompanySize::from_label(" 101-500 employees "),
        Some(CompanySize::Large)
    );
    assert_eq!(CompanySize::from_label("500"), None);
    assert_eq!(Urgency::from_label(" HIGH "), Some(Urgency::High));
}
