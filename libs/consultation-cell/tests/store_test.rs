use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};

use consultation_cell::models::{
    BookConsultationRequest, ConsultationCategory, ConsultationError, ConsultationStatus,
    RescheduleConsultationRequest,
};
use consultation_cell::services::ConsultationStore;
use expert_cell::services::ExpertDirectory;
use shared_utils::pagination::ListingQuery;
use shared_utils::test_utils::TestConfig;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn sample_store() -> (ConsultationStore, ExpertDirectory) {
    let config = TestConfig::default().to_app_config();
    let directory = ExpertDirectory::with_default_roster();
    let store = ConsultationStore::with_sample_data(&config, &directory, today(), Utc::now());
    (store, directory)
}

fn booking(expert_id: u64, payment_token: Option<&str>) -> BookConsultationRequest {
    BookConsultationRequest {
        expert_id,
        booking_date: today() + Duration::days(2),
        time_slot: "09:00".parse().unwrap(),
        payment_token: payment_token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_empty_store_starts_ids_at_one() {
    let config = TestConfig::default().to_app_config();
    let directory = ExpertDirectory::with_default_roster();
    let store = ConsultationStore::new(&config, Vec::new());

    let consultation = store.book(booking(2, Some("tok")), &directory, Utc::now()).await.unwrap();
    assert_eq!(consultation.id, 1);
    assert_eq!(consultation.status, ConsultationStatus::Confirmed);
}

#[tokio::test]
async fn test_booking_denormalizes_expert() {
    let (store, directory) = sample_store();
    let consultation = store.book(booking(9, Some("tok_9")), &directory, Utc::now()).await.unwrap();

    assert_eq!(consultation.id, 7);
    assert_eq!(consultation.expert_name, "Maryam Osman");
    assert_eq!(consultation.expert_specialization, "Zakat and Charitable Giving");
    assert_eq!(store.find(7).await.unwrap(), consultation);
}

#[tokio::test]
async fn test_booking_errors() {
    let (store, directory) = sample_store();

    assert_matches!(
        store.book(booking(0, Some("tok")), &directory, Utc::now()).await,
        Err(ConsultationError::ExpertNotFound)
    );
    assert_matches!(
        store.book(booking(1, None), &directory, Utc::now()).await,
        Err(ConsultationError::PaymentTokenMissing)
    );
    assert_eq!(store.max_id().await, 6);
}

#[tokio::test]
async fn test_concurrent_bookings_get_unique_ids() {
    let (store, directory) = sample_store();
    let store = Arc::new(store);
    let directory = Arc::new(directory);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            let directory = directory.clone();
            tokio::spawn(async move {
                store
                    .book(booking(i % 10 + 1, Some("tok")), &directory, Utc::now())
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(ids.iter().min(), Some(&7));
    assert_eq!(ids.iter().max(), Some(&38));
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (store, _) = sample_store();

    for id in [0, 7, 1000] {
        assert_matches!(store.find(id).await, Err(ConsultationError::NotFound));
        assert_matches!(store.detail(id).await, Err(ConsultationError::NotFound));
        assert_matches!(store.cancel(id, None, Utc::now()).await, Err(ConsultationError::NotFound));
        assert_matches!(
            store
                .reschedule(
                    id,
                    RescheduleConsultationRequest {
                        booking_date: today(),
                        time_slot: "10:00".parse().unwrap(),
                    },
                    Utc::now(),
                )
                .await,
            Err(ConsultationError::NotFound)
        );
    }
}

#[tokio::test]
async fn test_reschedule_keeps_status() {
    let (store, _) = sample_store();
    let new_date = today() + Duration::days(30);

    let updated = store
        .reschedule(
            5,
            RescheduleConsultationRequest {
                booking_date: new_date,
                time_slot: "16:30".parse().unwrap(),
            },
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, ConsultationStatus::Pending);
    assert_eq!(updated.booking_date, new_date);
    assert_eq!(updated.time_slot.as_str(), "16:30");
}

#[tokio::test]
async fn test_cancelled_booking_moves_out_of_requests() {
    let (store, _) = sample_store();
    assert_eq!(store.count(Some(ConsultationCategory::Requests), today()).await, 2);

    store.cancel(2, None, Utc::now()).await.unwrap();

    assert_eq!(store.count(Some(ConsultationCategory::Requests), today()).await, 1);
    // still in the future, so still upcoming
    assert_eq!(store.count(Some(ConsultationCategory::Upcoming), today()).await, 3);
}

#[tokio::test]
async fn test_list_pages_within_category() {
    let (store, _) = sample_store();

    let page = store
        .list(Some(ConsultationCategory::Past), &ListingQuery::new("", 2, 2), today())
        .await;

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, 6);
}

#[tokio::test]
async fn test_detail_experience_depends_on_seed_only() {
    let (store, _) = sample_store();
    let (other_store, _) = sample_store();

    let a = store.detail(1).await.unwrap();
    let b = other_store.detail(1).await.unwrap();
    assert_eq!(a.experience, b.experience);
    assert_eq!(a.duration, "60 minutes");
}
