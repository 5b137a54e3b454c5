use crate::models::booking::{
    BookingActionResponse, BookingRequest, BookingResponse, BookingsResponse, StatusUpdateRequest,
};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use rocket::{get, post, put};
use rocket_okapi::openapi;

/// Create a booking for a user; starts in PENDING awaiting admin approval
#[openapi(tag = "Bookings")]
#[post("/booking/create/<user_id>", format = "json", data = "<request>")]
pub async fn create_booking(
    user_id: &str,
    request: Json<BookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<status::Created<Json<BookingResponse>>, AppError> {
    let booking = booking_service
        .create_booking(user_id, request.into_inner())
        .await?;

    let location = format!("/api/booking/get-bookings/{}", user_id);
    Ok(status::Created::new(location).body(Json(BookingResponse {
        success: true,
        booking,
    })))
}

/// List a user's bookings, most recent first, with packages embedded
#[openapi(tag = "Bookings")]
#[get("/booking/get-bookings/<user_id>")]
pub async fn get_user_bookings(
    user_id: &str,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingsResponse>, AppError> {
    let bookings = booking_service.get_user_bookings(user_id).await?;
    Ok(Json(BookingsResponse {
        success: true,
        bookings,
    }))
}

/// Cancel a booking; only its owner may do this
#[openapi(tag = "Bookings")]
#[put("/booking/bookings/<user_id>/<booking_id>/cancel")]
pub async fn cancel_booking(
    user_id: &str,
    booking_id: &str,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingActionResponse>, AppError> {
    let booking = booking_service.cancel_booking(user_id, booking_id).await?;
    Ok(Json(BookingActionResponse {
        success: true,
        message: "Booking cancelled successfully".to_string(),
        booking,
    }))
}

/// Admin: set a booking's status to CONFIRMED or CANCELLED
#[openapi(tag = "Bookings")]
#[put("/booking/bookings/<booking_id>/status", format = "json", data = "<request>")]
pub async fn update_booking_status(
    booking_id: &str,
    request: Json<StatusUpdateRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingActionResponse>, AppError> {
    let status = request.into_inner().status.unwrap_or_default();
    let booking = booking_service
        .update_booking_status(booking_id, &status)
        .await?;

    Ok(Json(BookingActionResponse {
        success: true,
        message: format!("Booking status updated to {}", booking.status),
        booking,
    }))
}
