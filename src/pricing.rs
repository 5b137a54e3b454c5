//! Booking price computation. Pure functions over a fixed reference catalog
//! so the server can verify any client-side preview exactly.

use crate::models::booking::Transportation;
use crate::models::package::HotelTier;
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;

/// Canonical default party size for a fresh booking form.
pub const DEFAULT_PERSONS: i64 = 2;

/// A transportation choice with a flat per-person fare. Departure slots are
/// fixed per mode and do not vary with the chosen check-in date.
#[derive(Debug)]
pub struct TransportOption {
    pub mode: Transportation,
    pub label: &'static str,
    pub price: i64,
    pub travel_time: &'static str,
    pub departures: &'static [&'static str],
}

pub const TRANSPORT_OPTIONS: &[TransportOption] = &[
    TransportOption {
        mode: Transportation::Pia,
        label: "PIA Flight",
        price: 15_000,
        travel_time: "2 hours",
        departures: &["06:00 AM", "10:30 AM", "02:15 PM", "06:45 PM"],
    },
    TransportOption {
        mode: Transportation::Train,
        label: "Green Line Express",
        price: 3_500,
        travel_time: "18 hours",
        departures: &["07:30 PM", "08:15 PM"],
    },
];

pub fn transport_option(mode: Transportation) -> &'static TransportOption {
    match mode {
        Transportation::Pia => &TRANSPORT_OPTIONS[0],
        Transportation::Train => &TRANSPORT_OPTIONS[1],
    }
}

/// Absolute per-person per-night price of a tier. STANDARD is the baseline
/// at 0, so a tier's upgrade delta over STANDARD equals its absolute price.
pub fn tier_price(tier: HotelTier) -> i64 {
    match tier {
        HotelTier::Standard => 0,
        HotelTier::Deluxe => 5_000,
        HotelTier::Luxury => 15_000,
    }
}

/// The subset of package fields the calculator needs.
#[derive(Debug, Clone, Copy)]
pub struct PackageRates {
    pub price: i64,
    pub duration: i64,
    pub hotel_type: HotelTier,
}

/// User selections for a prospective booking. Dates are optional because the
/// form quotes continuously while they are still unset.
#[derive(Debug, Clone, Copy)]
pub struct BookingSelection {
    pub persons: i64,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub transportation: Transportation,
    pub hotel: HotelTier,
}

impl Default for BookingSelection {
    fn default() -> Self {
        BookingSelection {
            persons: DEFAULT_PERSONS,
            check_in: None,
            check_out: None,
            transportation: Transportation::Pia,
            hotel: HotelTier::Standard,
        }
    }
}

/// Itemized price breakdown. All amounts are PKR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quote {
    pub package_cost: i64,
    pub transport_cost: i64,
    pub hotel_upgrade_cost: i64,
    pub extra_days_cost: i64,
    pub stay_nights: i64,
    pub extra_nights: i64,
    pub total: i64,
}

/// Computes the total price for a package plus selections.
///
/// Without both dates the quote is zero (nothing to charge yet), not an
/// error. With dates, check-out must fall strictly after check-in. The
/// upgrade delta applies to the package's included duration only; nights
/// beyond it bill at the selected tier's absolute nightly rate. All
/// arithmetic is checked: a selection whose total does not fit in an `i64`
/// is rejected rather than wrapped.
pub fn quote(rates: &PackageRates, selection: &BookingSelection) -> AppResult<Quote> {
    if selection.persons < 1 {
        return Err(AppError::ValidationError(
            "persons must be at least 1".to_string(),
        ));
    }

    let (check_in, check_out) = match (selection.check_in, selection.check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => return Ok(Quote::default()),
    };

    let stay_nights = (check_out - check_in).num_days();
    if stay_nights <= 0 {
        return Err(AppError::ValidationError(
            "checkOut must be after checkIn".to_string(),
        ));
    }

    let persons = selection.persons;
    let extra_nights = (stay_nights - rates.duration).max(0);

    let package_cost = checked_mul(rates.price, persons)?;
    let transport_cost = checked_mul(transport_option(selection.transportation).price, persons)?;
    let hotel_upgrade_cost = if selection.hotel > rates.hotel_type {
        let delta = tier_price(selection.hotel) - tier_price(rates.hotel_type);
        checked_mul(checked_mul(delta, persons)?, rates.duration)?
    } else {
        0
    };
    let extra_days_cost = checked_mul(checked_mul(tier_price(selection.hotel), persons)?, extra_nights)?;

    let total = checked_add(
        checked_add(package_cost, transport_cost)?,
        checked_add(hotel_upgrade_cost, extra_days_cost)?,
    )?;

    Ok(Quote {
        package_cost,
        transport_cost,
        hotel_upgrade_cost,
        extra_days_cost,
        stay_nights,
        extra_nights,
        total,
    })
}

fn checked_mul(a: i64, b: i64) -> AppResult<i64> {
    a.checked_mul(b).ok_or_else(price_out_of_range)
}

fn checked_add(a: i64, b: i64) -> AppResult<i64> {
    a.checked_add(b).ok_or_else(price_out_of_range)
}

fn price_out_of_range() -> AppError {
    AppError::ValidationError("Booking total exceeds the supported price range".to_string())
}
