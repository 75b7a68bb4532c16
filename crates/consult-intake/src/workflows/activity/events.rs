use crate::workflows::consultations::{
    ConsultationId, ConsultationRecord, ConsultationStatus, Urgency,
};

use super::domain::{ActivityColor, ActivityIcon, ActivityKind, NewActivity};

impl NewActivity {
    pub fn consultation_booked(record: &ConsultationRecord) -> Self {
        let urgent = Urgency::from_label(&record.urgency) == Some(Urgency::High);
        let (kind, color) = if urgent {
            (ActivityKind::HighUrgencyBooking, ActivityColor::Red)
        } else {
            (ActivityKind::ConsultationBooked, ActivityColor::Blue)
        };

        Self {
            kind,
            title: format!("New consultation booked: {}", record.full_name()),
            description: format!(
                "{} ({}) requested {} at {}, priority {}",
                record.company,
                record.industry,
                record.preferred_date,
                record.preferred_time,
                record.priority_score
            ),
            icon: ActivityIcon::Calendar,
            color,
            actionable: true,
            follow_up: urgent,
            consultation_id: Some(record.consultation_id.clone()),
            value: Some(record.estimated_value),
        }
    }

    pub fn consultation_status_changed(
        record: &ConsultationRecord,
        previous: ConsultationStatus,
    ) -> Self {
        let (kind, icon, color) = match record.status {
            ConsultationStatus::Completed => (
                ActivityKind::ConsultationCompleted,
                ActivityIcon::Award,
                ActivityColor::Purple,
            ),
            ConsultationStatus::Confirmed => (
                ActivityKind::ConsultationUpdated,
                ActivityIcon::Check,
                ActivityColor::Green,
            ),
            ConsultationStatus::Rejected | ConsultationStatus::Cancelled => (
                ActivityKind::ConsultationUpdated,
                ActivityIcon::Edit,
                ActivityColor::Yellow,
            ),
            ConsultationStatus::Pending => (
                ActivityKind::ConsultationUpdated,
                ActivityIcon::Edit,
                ActivityColor::Blue,
            ),
        };

        Self {
            kind,
            title: format!(
                "Consultation {}: {}",
                record.status.label(),
                record.full_name()
            ),
            description: format!(
                "{} moved from {} to {}",
                record.consultation_id,
                previous.label(),
                record.status.label()
            ),
            icon,
            color,
            actionable: record.status == ConsultationStatus::Confirmed,
            follow_up: record.status == ConsultationStatus::Completed,
            consultation_id: Some(record.consultation_id.clone()),
            value: Some(record.estimated_value),
        }
    }

    pub fn consultation_deleted(id: &ConsultationId, name: &str) -> Self {
        Self {
            kind: ActivityKind::ConsultationDeleted,
            title: format!("Consultation removed: {name}"),
            description: format!("{id} was deleted from the booking system"),
            icon: ActivityIcon::Activity,
            color: ActivityColor::Orange,
            actionable: false,
            follow_up: false,
            consultation_id: Some(id.clone()),
            value: None,
        }
    }
}
