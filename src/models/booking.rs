use crate::models::package::{HotelTier, Package};
use crate::utils::error::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Transportation modes from the fixed reference catalog (see `pricing`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Transportation {
    Pia,
    Train,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub package_id: String,
    pub persons: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub transportation: Transportation,
    pub hotel: HotelTier,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub id: String,
    pub user_id: String,
    pub package_id: String,
    pub persons: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub transportation: String,
    pub hotel: String,
    pub total_price: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> AppResult<Self> {
        let transportation = row.transportation.parse::<Transportation>().map_err(|_| {
            AppError::DatabaseError(format!(
                "invalid stored transportation: {}",
                row.transportation
            ))
        })?;
        let hotel = row
            .hotel
            .parse::<HotelTier>()
            .map_err(|_| AppError::DatabaseError(format!("invalid stored hotel: {}", row.hotel)))?;
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|_| AppError::DatabaseError(format!("invalid stored status: {}", row.status)))?;

        Ok(Booking {
            id: row.id,
            user_id: row.user_id,
            package_id: row.package_id,
            persons: row.persons,
            check_in: row.check_in,
            check_out: row.check_out,
            transportation,
            hotel,
            total_price: row.total_price,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Booking create payload. Every field is optional at the wire level so a
/// request with holes can be answered with the full list of missing fields.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub package_id: Option<String>,
    pub persons: Option<i64>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub transportation: Option<String>,
    pub hotel: Option<String>,
    pub total_price: Option<i64>,
}

impl BookingRequest {
    /// Names of all absent required fields, in the order the API documents
    /// them.
    pub fn missing_fields(&self, user_id: &str) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if user_id.trim().is_empty() {
            missing.push("userId");
        }
        if self.package_id.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("packageId");
        }
        if self.persons.is_none() {
            missing.push("persons");
        }
        if self.check_in.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("checkIn");
        }
        if self.check_out.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("checkOut");
        }
        if self
            .transportation
            .as_deref()
            .map_or(true, |v| v.trim().is_empty())
        {
            missing.push("transportation");
        }
        if self.hotel.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("hotel");
        }
        if self.total_price.is_none() {
            missing.push("totalPrice");
        }
        missing
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// A booking joined with its package for the "my bookings" listing. The
/// package is optional: packages are hard-deleted and a booking outlives its
/// package, so the listing embeds `null` once the package is gone.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPackage {
    #[serde(flatten)]
    pub booking: Booking,
    pub package: Option<Package>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<BookingWithPackage>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingActionResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}
