mod common;

use common::*;
use hsrp_core::{BookingError, BookingQueries, BookingService, VehicleCategory};

#[tokio::test]
async fn track_by_mobile_with_no_matches_is_an_empty_list() {
    let store = InMemoryStore::new();
    let service = BookingService::new(store.clone(), MemoryProofSink::working());
    let queries = BookingQueries::new(store);

    service
        .create_booking(valid_booking(VehicleCategory::Car))
        .await
        .unwrap();

    let results = queries.track_by_mobile("9999999999").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn track_by_mobile_rejects_a_malformed_number() {
    let queries = BookingQueries::new(InMemoryStore::new());
    let err = queries.track_by_mobile("12345").await.unwrap_err();
    let BookingError::Validation(issues) = err else {
        panic!("expected validation error");
    };
    assert_eq!(issues[0].field, "mobile");
}

#[tokio::test]
async fn track_by_mobile_returns_newest_first() {
    let store = InMemoryStore::new();
    let service = BookingService::new(store.clone(), MemoryProofSink::working());
    let queries = BookingQueries::new(store);

    let first = service
        .create_booking(valid_booking(VehicleCategory::Bike))
        .await
        .unwrap();
    let second = service
        .create_booking(valid_booking(VehicleCategory::Car))
        .await
        .unwrap();

    let results = queries.track_by_mobile("9876543210").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].order_id, second.order_id);
    assert_eq!(results[1].order_id, first.order_id);
}

#[tokio::test]
async fn track_by_order_id_finds_the_booking() {
    let store = InMemoryStore::new();
    let service = BookingService::new(store.clone(), MemoryProofSink::working());
    let queries = BookingQueries::new(store);

    let receipt = service
        .create_booking(valid_booking(VehicleCategory::Electric))
        .await
        .unwrap();
    let booking = queries.track(&receipt.order_id).await.unwrap();
    assert_eq!(booking.id, receipt.booking_id);
    assert_eq!(booking.amount, 1003);
}

#[tokio::test]
async fn track_by_unknown_order_id_is_not_found() {
    let queries = BookingQueries::new(InMemoryStore::new());
    let err = queries.track("HSRP-0").await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
}

#[tokio::test]
async fn admin_listing_returns_every_booking_newest_first() {
    let store = InMemoryStore::new();
    let service = BookingService::new(store.clone(), MemoryProofSink::working());
    let queries = BookingQueries::new(store);

    let mut other = valid_booking(VehicleCategory::Heavy);
    other.owner_mobile = "7000000001".to_string();

    let first = service
        .create_booking(valid_booking(VehicleCategory::Car))
        .await
        .unwrap();
    let second = service.create_booking(other).await.unwrap();

    let results = queries.list_for_admin().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].order_id, second.order_id);
    assert_eq!(results[1].order_id, first.order_id);
}
