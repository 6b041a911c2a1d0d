// libs/consultation-cell/src/services/lifecycle.rs
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{Consultation, ConsultationCategory, ConsultationError, ConsultationStatus};

/// Status rules for consultations: `pending -> confirmed -> completed`, with
/// `cancelled` reachable from the two open states.
pub struct ConsultationLifecycle;

impl ConsultationLifecycle {
    /// Statuses reachable from `current` in one step.
    pub fn valid_transitions(current: ConsultationStatus) -> &'static [ConsultationStatus] {
        match current {
            ConsultationStatus::Pending => &[ConsultationStatus::Confirmed, ConsultationStatus::Cancelled],
            ConsultationStatus::Confirmed => &[ConsultationStatus::Completed, ConsultationStatus::Cancelled],
            // Terminal states
            ConsultationStatus::Completed | ConsultationStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(status: ConsultationStatus) -> bool {
        Self::valid_transitions(status).is_empty()
    }

    /// Cancellation is refused only for completed consultations. Cancelling
    /// an already cancelled one is accepted and changes nothing.
    pub fn ensure_cancellable(current: ConsultationStatus) -> Result<(), ConsultationError> {
        if current == ConsultationStatus::Cancelled
            || Self::valid_transitions(current).contains(&ConsultationStatus::Cancelled)
        {
            debug!("Cancellation allowed from {}", current);
            return Ok(());
        }

        warn!("Refusing to cancel consultation in status {}", current);
        Err(ConsultationError::CannotCancel(current))
    }

    /// Rescheduling keeps the status, so it is only open to non-terminal states.
    pub fn ensure_reschedulable(current: ConsultationStatus) -> Result<(), ConsultationError> {
        if Self::is_terminal(current) {
            warn!("Refusing to reschedule consultation in status {}", current);
            return Err(ConsultationError::CannotReschedule(current));
        }
        Ok(())
    }

    pub fn belongs_to(consultation: &Consultation, category: ConsultationCategory, today: NaiveDate) -> bool {
        let completed = consultation.status == ConsultationStatus::Completed;
        match category {
            ConsultationCategory::Upcoming => consultation.booking_date > today && !completed,
            ConsultationCategory::Requests => consultation.status == ConsultationStatus::Pending,
            ConsultationCategory::Past => consultation.booking_date < today || completed,
        }
    }
}
