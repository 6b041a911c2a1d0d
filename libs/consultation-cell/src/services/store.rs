// libs/consultation-cell/src/services/store.rs
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use expert_cell::models::Expert;
use expert_cell::services::ExpertDirectory;
use shared_config::AppConfig;
use shared_models::response::Page;
use shared_utils::pagination::ListingQuery;
use shared_utils::seed::derive_rng;

use crate::models::{
    BookConsultationRequest, Consultation, ConsultationCategory, ConsultationDetail,
    ConsultationError, ConsultationStatus, RescheduleConsultationRequest, SlotTime,
};
use crate::services::lifecycle::ConsultationLifecycle;

pub const SESSION_DURATION: &str = "60 minutes";

/// Owns the in-memory consultation collection. Every mutation holds the
/// write lock for its whole check-and-update, so id assignment and status
/// changes never interleave.
pub struct ConsultationStore {
    consultations: RwLock<Vec<Consultation>>,
    seed: u64,
    meeting_link_base: String,
}

impl ConsultationStore {
    pub fn new(config: &AppConfig, consultations: Vec<Consultation>) -> Self {
        Self {
            consultations: RwLock::new(consultations),
            seed: config.mock_data_seed,
            meeting_link_base: config.meeting_link_base.trim_end_matches('/').to_string(),
        }
    }

    /// Store pre-populated with a handful of bookings around `today`, one or
    /// more in each status.
    pub fn with_sample_data(config: &AppConfig, directory: &ExpertDirectory, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let plan: [(u64, i64, &str, ConsultationStatus); 6] = [
            (1, 3, "10:00", ConsultationStatus::Confirmed),
            (6, 5, "14:00", ConsultationStatus::Pending),
            (2, -7, "11:00", ConsultationStatus::Completed),
            (7, -2, "09:00", ConsultationStatus::Cancelled),
            (3, 10, "16:00", ConsultationStatus::Pending),
            (8, -14, "13:00", ConsultationStatus::Completed),
        ];

        let consultations = plan
            .iter()
            .zip(1u64..)
            .filter_map(|((expert_id, day_offset, slot, status), id)| {
                let expert = directory.find(*expert_id).ok()?;
                let time_slot = slot.parse::<SlotTime>().ok()?;
                let mut consultation = new_consultation(id, expert, today + Duration::days(*day_offset), time_slot, now);
                consultation.status = *status;
                Some(consultation)
            })
            .collect();

        Self::new(config, consultations)
    }

    pub async fn book(
        &self,
        request: BookConsultationRequest,
        directory: &ExpertDirectory,
        now: DateTime<Utc>,
    ) -> Result<Consultation, ConsultationError> {
        let expert = directory
            .find(request.expert_id)
            .map_err(|_| ConsultationError::ExpertNotFound)?;

        // Any non-empty token is accepted; no payment provider is involved
        let has_payment = request
            .payment_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());
        if !has_payment {
            return Err(ConsultationError::PaymentTokenMissing);
        }

        let mut consultations = self.consultations.write().await;
        let id = consultations.iter().map(|c| c.id).max().unwrap_or(0) + 1;

        let mut consultation = new_consultation(id, expert, request.booking_date, request.time_slot, now);
        consultation.status = ConsultationStatus::Confirmed;
        consultations.push(consultation.clone());

        info!("Booked consultation {} with expert {} on {}", id, expert.id, consultation.booking_date);
        Ok(consultation)
    }

    pub async fn find(&self, consultation_id: u64) -> Result<Consultation, ConsultationError> {
        self.consultations
            .read()
            .await
            .iter()
            .find(|c| c.id == consultation_id)
            .cloned()
            .ok_or(ConsultationError::NotFound)
    }

    pub async fn detail(&self, consultation_id: u64) -> Result<ConsultationDetail, ConsultationError> {
        let consultation = self.find(consultation_id).await?;

        let years: u32 = derive_rng(self.seed, consultation.id).gen_range(5..=24);

        Ok(ConsultationDetail {
            experience: format!("{} years", years),
            duration: SESSION_DURATION.to_string(),
            meeting_link: format!("{}/{}", self.meeting_link_base, consultation.id),
            consultation,
        })
    }

    pub async fn cancel(
        &self,
        consultation_id: u64,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Consultation, ConsultationError> {
        let mut consultations = self.consultations.write().await;
        let consultation = consultations
            .iter_mut()
            .find(|c| c.id == consultation_id)
            .ok_or(ConsultationError::NotFound)?;

        ConsultationLifecycle::ensure_cancellable(consultation.status)?;

        if consultation.status != ConsultationStatus::Cancelled {
            consultation.status = ConsultationStatus::Cancelled;
            consultation.updated_at = now;
        }
        if let Some(reason) = reason.filter(|r| !r.trim().is_empty()) {
            consultation.cancellation_reason = Some(reason);
        }

        info!("Consultation {} cancelled", consultation_id);
        Ok(consultation.clone())
    }

    pub async fn reschedule(
        &self,
        consultation_id: u64,
        request: RescheduleConsultationRequest,
        now: DateTime<Utc>,
    ) -> Result<Consultation, ConsultationError> {
        let mut consultations = self.consultations.write().await;
        let consultation = consultations
            .iter_mut()
            .find(|c| c.id == consultation_id)
            .ok_or(ConsultationError::NotFound)?;

        ConsultationLifecycle::ensure_reschedulable(consultation.status)?;

        consultation.booking_date = request.booking_date;
        consultation.time_slot = request.time_slot;
        consultation.updated_at = now;

        info!(
            "Consultation {} rescheduled to {} {}",
            consultation_id,
            consultation.booking_date,
            consultation.time_slot.as_str()
        );
        Ok(consultation.clone())
    }

    /// Stored order is preserved; the category is resolved against `today`.
    pub async fn list(
        &self,
        category: Option<ConsultationCategory>,
        query: &ListingQuery,
        today: NaiveDate,
    ) -> Page<Consultation> {
        debug!("Listing consultations category={:?} query={:?}", category, query);

        let consultations = self.consultations.read().await;
        let in_category = consultations.iter().filter(|c| {
            category.map_or(true, |category| ConsultationLifecycle::belongs_to(c, category, today))
        });

        query.apply(in_category)
    }

    pub async fn count(&self, category: Option<ConsultationCategory>, today: NaiveDate) -> usize {
        self.consultations
            .read()
            .await
            .iter()
            .filter(|c| category.map_or(true, |category| ConsultationLifecycle::belongs_to(c, category, today)))
            .count()
    }

    pub async fn max_id(&self) -> u64 {
        self.consultations.read().await.iter().map(|c| c.id).max().unwrap_or(0)
    }
}

fn new_consultation(
    id: u64,
    expert: &Expert,
    booking_date: NaiveDate,
    time_slot: SlotTime,
    now: DateTime<Utc>,
) -> Consultation {
    Consultation {
        id,
        expert_id: expert.id,
        expert_name: expert.name.clone(),
        expert_specialization: expert.specialization.clone(),
        expert_image: expert.image.clone(),
        booking_date,
        time_slot,
        status: ConsultationStatus::Pending,
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
    }
}
