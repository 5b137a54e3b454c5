use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool as Pool;
use test_context::{test_context, AsyncTestContext};
use travel_hub_api::{
    models::booking::{BookingRequest, BookingStatus, Transportation},
    models::package::HotelTier,
    services::booking_service::BookingService,
    services::package_service::PackageService,
    utils::error::AppError,
};

mod common {
    pub mod test_utils;
}
use common::test_utils::{seed_package, FakeMediaStore};

struct BookingServiceContext {
    pool: Pool,
    package_service: PackageService,
    booking_service: BookingService,
}

#[async_trait]
impl AsyncTestContext for BookingServiceContext {
    async fn setup() -> Self {
        let pool = common::test_utils::memory_pool()
            .await
            .expect("Failed to create in-memory test database");

        let package_service = PackageService::new(pool.clone(), Arc::new(FakeMediaStore::new()));
        let booking_service = BookingService::new(pool.clone());

        BookingServiceContext {
            pool,
            package_service,
            booking_service,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;
    }
}

// A 7-night stay on the seeded 5-day, 50,000 PKR STANDARD package with a
// DELUXE upgrade and PIA flights for 2 persons totals 200,000 PKR.
fn valid_request(package_id: &str) -> BookingRequest {
    BookingRequest {
        package_id: Some(package_id.to_string()),
        persons: Some(2),
        check_in: Some("2025-06-01".to_string()),
        check_out: Some("2025-06-08".to_string()),
        transportation: Some("pia".to_string()),
        hotel: Some("deluxe".to_string()),
        total_price: Some(200_000),
    }
}

async fn booking_count(pool: &Pool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking")
        .fetch_one(pool)
        .await
        .expect("count query should succeed")
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn create_booking_starts_pending(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.hotel, HotelTier::Deluxe);
    assert_eq!(booking.transportation, Transportation::Pia);
    assert_eq!(booking.total_price, 200_000);
    assert_eq!(
        booking.check_in,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].booking.id, booking.id);
    assert_eq!(
        listed[0].package.as_ref().map(|p| p.id.as_str()),
        Some(package.id.as_str())
    );
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn listing_keeps_bookings_whose_package_was_deleted(
    ctx: &BookingServiceContext,
) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    ctx.package_service.delete_package(&package.id).await?;

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].booking.id, booking.id);
    assert!(listed[0].package.is_none());

    // the booking itself is still live and cancellable
    let cancelled = ctx
        .booking_service
        .cancel_booking("user-1", &booking.id)
        .await?;
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn rfc3339_dates_are_accepted(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let mut request = valid_request(&package.id);
    request.check_in = Some("2025-06-01T00:00:00.000Z".to_string());
    request.check_out = Some("2025-06-08T00:00:00.000Z".to_string());

    let booking = ctx.booking_service.create_booking("user-1", request).await?;
    assert_eq!(
        booking.check_out,
        NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()
    );
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn single_missing_field_is_named(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let mut request = valid_request(&package.id);
    request.hotel = None;

    let err = ctx
        .booking_service
        .create_booking("user-1", request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: hotel");
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn all_missing_fields_are_listed_in_order(ctx: &BookingServiceContext) {
    let request = BookingRequest {
        package_id: None,
        persons: None,
        check_in: Some("  ".to_string()),
        check_out: None,
        transportation: Some("pia".to_string()),
        hotel: Some("deluxe".to_string()),
        total_price: None,
    };

    let err = ctx
        .booking_service
        .create_booking("", request)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required fields: userId, packageId, persons, checkIn, checkOut, totalPrice"
    );
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn unknown_package_is_not_found(ctx: &BookingServiceContext) {
    let result = ctx
        .booking_service
        .create_booking("user-1", valid_request("no-such-package"))
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Package not found"),
        other => panic!("expected not found, got {:?}", other.map(|b| b.id)),
    }
    assert_eq!(booking_count(&ctx.pool).await, 0);
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn price_mismatch_is_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let mut request = valid_request(&package.id);
    request.total_price = Some(150_000);

    let err = ctx
        .booking_service
        .create_booking("user-1", request)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "totalPrice mismatch: expected 200000, got 150000"
    );
    assert_eq!(booking_count(&ctx.pool).await, 0);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn checkout_before_checkin_is_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let mut request = valid_request(&package.id);
    request.check_in = Some("2025-06-08".to_string());
    request.check_out = Some("2025-06-01".to_string());

    let err = ctx
        .booking_service
        .create_booking("user-1", request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "checkOut must be after checkIn");
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn invalid_transportation_is_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let mut request = valid_request(&package.id);
    request.transportation = Some("bus".to_string());

    let err = ctx
        .booking_service
        .create_booking("user-1", request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid transportation: bus");
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn bookings_list_most_recent_first(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;

    let first = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;
    // created_at has sub-second resolution; keep the inserts apart
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let second = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].booking.id, second.id);
    assert_eq!(listed[1].booking.id, first.id);

    // another user's listing stays empty
    let other = ctx.booking_service.get_user_bookings("user-2").await?;
    assert!(other.is_empty());
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn blank_user_id_listing_is_rejected(ctx: &BookingServiceContext) {
    let err = ctx.booking_service.get_user_bookings("  ").await.unwrap_err();
    assert_eq!(err.to_string(), "User ID is required");
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn owner_can_cancel_a_booking(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    let cancelled = ctx
        .booking_service
        .cancel_booking("user-1", &booking.id)
        .await?;
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed[0].booking.status, BookingStatus::Cancelled);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn cancel_by_non_owner_is_forbidden(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    let err = ctx
        .booking_service
        .cancel_booking("user-2", &booking.id)
        .await
        .unwrap_err();
    match err {
        AppError::Forbidden(msg) => assert_eq!(msg, "Unauthorized to cancel this booking"),
        other => panic!("expected forbidden, got {:?}", other),
    }

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed[0].booking.status, BookingStatus::Pending);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn cancel_of_unknown_booking_is_not_found(ctx: &BookingServiceContext) {
    let err = ctx
        .booking_service
        .cancel_booking("user-1", "no-such-booking")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Booking not found");
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn admin_confirmation_persists(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    let confirmed = ctx
        .booking_service
        .update_booking_status(&booking.id, "CONFIRMED")
        .await?;
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed[0].booking.status, BookingStatus::Confirmed);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn status_update_accepts_lowercase_input(
    ctx: &BookingServiceContext,
) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    let updated = ctx
        .booking_service
        .update_booking_status(&booking.id, "cancelled")
        .await?;
    assert_eq!(updated.status, BookingStatus::Cancelled);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn unknown_status_values_are_rejected(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    for status in ["SHIPPED", "PENDING"] {
        let err = ctx
            .booking_service
            .update_booking_status(&booking.id, status)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status. Must be CONFIRMED or CANCELLED"
        );
    }

    let listed = ctx.booking_service.get_user_bookings("user-1").await?;
    assert_eq!(listed[0].booking.status, BookingStatus::Pending);
    Ok(())
}

#[test_context(BookingServiceContext)]
#[tokio::test]
async fn admin_can_revive_a_cancelled_booking(ctx: &BookingServiceContext) -> Result<(), AppError> {
    let package = seed_package(&ctx.package_service).await?;
    let booking = ctx
        .booking_service
        .create_booking("user-1", valid_request(&package.id))
        .await?;

    ctx.booking_service
        .cancel_booking("user-1", &booking.id)
        .await?;
    let revived = ctx
        .booking_service
        .update_booking_status(&booking.id, "CONFIRMED")
        .await?;

    assert_eq!(revived.status, BookingStatus::Confirmed);
    Ok(())
}
