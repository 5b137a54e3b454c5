use crate::models::booking::{
    Booking, BookingRequest, BookingRow, BookingStatus, BookingWithPackage, Transportation,
};
use crate::models::package::{HotelTier, Package, PackageRow};
use crate::pricing::{self, BookingSelection};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(pool: SqlitePool) -> Self {
        BookingService { pool }
    }

    /// Creates a booking in PENDING. The client-submitted total is treated
    /// as a display hint only: the server recomputes the price from the
    /// catalog and rejects any mismatch.
    pub async fn create_booking(
        &self,
        user_id: &str,
        request: BookingRequest,
    ) -> AppResult<Booking> {
        let missing = request.missing_fields(user_id);
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let BookingRequest {
            package_id: Some(package_id),
            persons: Some(persons),
            check_in: Some(check_in),
            check_out: Some(check_out),
            transportation: Some(transportation),
            hotel: Some(hotel),
            total_price: Some(total_price),
        } = request
        else {
            return Err(AppError::ValidationError(
                "Missing required fields".to_string(),
            ));
        };

        if persons < 1 {
            return Err(AppError::ValidationError(
                "persons must be at least 1".to_string(),
            ));
        }

        let check_in = parse_client_date("checkIn", &check_in)?;
        let check_out = parse_client_date("checkOut", &check_out)?;
        let transportation = transportation.parse::<Transportation>().map_err(|_| {
            AppError::ValidationError(format!("Invalid transportation: {}", transportation))
        })?;
        // parsed case-insensitively, stored canonically upper-case
        let hotel = hotel
            .parse::<HotelTier>()
            .map_err(|_| AppError::ValidationError(format!("Invalid hotel: {}", hotel)))?;

        let package = self.fetch_package(&package_id).await?;

        let selection = BookingSelection {
            persons,
            check_in: Some(check_in),
            check_out: Some(check_out),
            transportation,
            hotel,
        };
        let quote = pricing::quote(&package.rates(), &selection)?;
        if quote.total != total_price {
            return Err(AppError::ValidationError(format!(
                "totalPrice mismatch: expected {}, got {}",
                quote.total, total_price
            )));
        }

        let now = Utc::now().naive_utc();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            package_id,
            persons,
            check_in,
            check_out,
            transportation,
            hotel,
            total_price: quote.total,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO booking
            (id, user_id, package_id, persons, check_in, check_out, transportation,
             hotel, total_price, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(&booking.package_id)
        .bind(booking.persons)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.transportation.to_string())
        .bind(booking.hotel.to_string())
        .bind(booking.total_price)
        .bind(booking.status.to_string())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(booking_id = %booking.id, user_id, total = booking.total_price, "booking created");
        Ok(booking)
    }

    /// All bookings for a user, most recent first, each with its package
    /// embedded. A booking whose package was deleted still appears, with a
    /// null package.
    pub async fn get_user_bookings(&self, user_id: &str) -> AppResult<Vec<BookingWithPackage>> {
        if user_id.trim().is_empty() {
            return Err(AppError::ValidationError("User ID is required".to_string()));
        }

        let rows = sqlx::query_as::<_, BookingJoinRow>(
            r#"
            SELECT
                b.id, b.user_id, b.package_id, b.persons, b.check_in, b.check_out,
                b.transportation, b.hotel, b.total_price, b.status,
                b.created_at, b.updated_at,
                p.id AS package_row_id, p.destination, p.description, p.location,
                p.hotel_name, p.hotel_type, p.difficulty, p.price, p.duration,
                p.people_count, p.rooms_count, p.complementary_breakfast,
                p.pick_and_drop, p.features, p.image_url,
                p.created_at AS package_created_at, p.updated_at AS package_updated_at
            FROM booking b
            LEFT JOIN package p ON p.id = b.package_id
            WHERE b.user_id = ?
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingWithPackage::try_from).collect()
    }

    /// Cancels a booking on behalf of its owner. Ownership is the only
    /// precondition; the current status is overwritten regardless.
    pub async fn cancel_booking(&self, user_id: &str, booking_id: &str) -> AppResult<Booking> {
        if user_id.trim().is_empty() || booking_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "User ID and Booking ID are required".to_string(),
            ));
        }

        let row = self.fetch_booking(booking_id).await?;
        if row.user_id != user_id {
            return Err(AppError::Forbidden(
                "Unauthorized to cancel this booking".to_string(),
            ));
        }

        self.write_status(booking_id, row, BookingStatus::Cancelled)
            .await
    }

    /// Admin status overwrite, keyed by booking id only. Any current state
    /// may be rewritten; the status itself must be CONFIRMED or CANCELLED.
    pub async fn update_booking_status(
        &self,
        booking_id: &str,
        status: &str,
    ) -> AppResult<Booking> {
        if booking_id.trim().is_empty() || status.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Booking ID and status are required".to_string(),
            ));
        }

        let status = status
            .parse::<BookingStatus>()
            .ok()
            .filter(|s| matches!(s, BookingStatus::Confirmed | BookingStatus::Cancelled))
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Invalid status. Must be CONFIRMED or CANCELLED".to_string(),
                )
            })?;

        let row = self.fetch_booking(booking_id).await?;
        self.write_status(booking_id, row, status).await
    }

    async fn fetch_package(&self, package_id: &str) -> AppResult<Package> {
        let row = sqlx::query_as::<_, PackageRow>("SELECT * FROM package WHERE id = ?")
            .bind(package_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;
        Package::try_from(row)
    }

    async fn fetch_booking(&self, booking_id: &str) -> AppResult<BookingRow> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM booking WHERE id = ?")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    async fn write_status(
        &self,
        booking_id: &str,
        row: BookingRow,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        let now = Utc::now().naive_utc();
        sqlx::query("UPDATE booking SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(now)
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        let mut booking = Booking::try_from(row)?;
        booking.status = status;
        booking.updated_at = now;

        tracing::info!(booking_id, status = %status, "booking status updated");
        Ok(booking)
    }
}

/// Clients send dates either as plain `YYYY-MM-DD` or as full RFC 3339
/// timestamps (the web client serializes Date objects).
fn parse_client_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::ValidationError(format!("Invalid {} date format", field)))
}

#[derive(Debug, sqlx::FromRow)]
struct BookingJoinRow {
    id: String,
    user_id: String,
    package_id: String,
    persons: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    transportation: String,
    hotel: String,
    total_price: i64,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    package_row_id: Option<String>,
    destination: Option<String>,
    description: Option<String>,
    location: Option<String>,
    hotel_name: Option<String>,
    hotel_type: Option<String>,
    difficulty: Option<String>,
    price: Option<i64>,
    duration: Option<i64>,
    people_count: Option<i64>,
    rooms_count: Option<i64>,
    complementary_breakfast: Option<bool>,
    pick_and_drop: Option<bool>,
    features: Option<String>,
    image_url: Option<String>,
    package_created_at: Option<NaiveDateTime>,
    package_updated_at: Option<NaiveDateTime>,
}

impl TryFrom<BookingJoinRow> for BookingWithPackage {
    type Error = AppError;

    fn try_from(row: BookingJoinRow) -> AppResult<Self> {
        let booking = Booking::try_from(BookingRow {
            id: row.id,
            user_id: row.user_id,
            package_id: row.package_id,
            persons: row.persons,
            check_in: row.check_in,
            check_out: row.check_out,
            transportation: row.transportation,
            hotel: row.hotel,
            total_price: row.total_price,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })?;
        // The package columns come through a LEFT JOIN against NOT NULL
        // columns, so they are either all present or all NULL.
        let package = match (
            row.package_row_id,
            row.destination,
            row.description,
            row.location,
            row.hotel_name,
            row.hotel_type,
            row.difficulty,
            row.price,
            row.duration,
            row.people_count,
            row.rooms_count,
            row.complementary_breakfast,
            row.pick_and_drop,
            row.features,
            row.image_url,
            row.package_created_at,
            row.package_updated_at,
        ) {
            (
                Some(id),
                Some(destination),
                Some(description),
                Some(location),
                Some(hotel_name),
                Some(hotel_type),
                Some(difficulty),
                Some(price),
                Some(duration),
                Some(people_count),
                Some(rooms_count),
                Some(complementary_breakfast),
                Some(pick_and_drop),
                Some(features),
                Some(image_url),
                Some(created_at),
                Some(updated_at),
            ) => Some(Package::try_from(PackageRow {
                id,
                destination,
                description,
                location,
                hotel_name,
                hotel_type,
                difficulty,
                price,
                duration,
                people_count,
                rooms_count,
                complementary_breakfast,
                pick_and_drop,
                features,
                image_url,
                created_at,
                updated_at,
            })?),
            _ => None,
        };

        Ok(BookingWithPackage { booking, package })
    }
}
