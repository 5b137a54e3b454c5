use crate::pricing::PackageRates;
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Hotel quality levels, ordered STANDARD < DELUXE < LUXURY.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
    Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum HotelTier {
    Standard,
    Deluxe,
    Luxury,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Moderate,
    Extreme,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub destination: String,
    pub description: String,
    pub location: String,
    pub hotel_name: String,
    pub hotel_type: HotelTier,
    pub difficulty: Difficulty,
    pub price: i64,
    pub duration: i64,
    pub people_count: i64,
    pub rooms_count: i64,
    pub complementary_breakfast: bool,
    pub pick_and_drop: bool,
    pub features: Vec<String>,
    pub image_url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Package {
    pub fn rates(&self) -> PackageRates {
        PackageRates {
            price: self.price,
            duration: self.duration,
            hotel_type: self.hotel_type,
        }
    }
}

/// Raw database row; enums are stored as their canonical text form and
/// features as a JSON array string.
#[derive(Debug, sqlx::FromRow)]
pub struct PackageRow {
    pub id: String,
    pub destination: String,
    pub description: String,
    pub location: String,
    pub hotel_name: String,
    pub hotel_type: String,
    pub difficulty: String,
    pub price: i64,
    pub duration: i64,
    pub people_count: i64,
    pub rooms_count: i64,
    pub complementary_breakfast: bool,
    pub pick_and_drop: bool,
    pub features: String,
    pub image_url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PackageRow> for Package {
    type Error = AppError;

    fn try_from(row: PackageRow) -> AppResult<Self> {
        let hotel_type = row.hotel_type.parse::<HotelTier>().map_err(|_| {
            AppError::DatabaseError(format!("invalid stored hotel_type: {}", row.hotel_type))
        })?;
        let difficulty = row.difficulty.parse::<Difficulty>().map_err(|_| {
            AppError::DatabaseError(format!("invalid stored difficulty: {}", row.difficulty))
        })?;
        let features = serde_json::from_str(&row.features)
            .map_err(|e| AppError::DatabaseError(format!("invalid stored features: {}", e)))?;

        Ok(Package {
            id: row.id,
            destination: row.destination,
            description: row.description,
            location: row.location,
            hotel_name: row.hotel_name,
            hotel_type,
            difficulty,
            price: row.price,
            duration: row.duration,
            people_count: row.people_count,
            rooms_count: row.rooms_count,
            complementary_breakfast: row.complementary_breakfast,
            pick_and_drop: row.pick_and_drop,
            features,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A fully validated set of fields for creating a package. The image is
/// handled separately since it goes through the media host first.
#[derive(Debug, Clone)]
pub struct PackageDraft {
    pub destination: String,
    pub description: String,
    pub location: String,
    pub hotel_name: String,
    pub hotel_type: HotelTier,
    pub difficulty: Difficulty,
    pub price: i64,
    pub duration: i64,
    pub people_count: i64,
    pub rooms_count: i64,
    pub complementary_breakfast: bool,
    pub pick_and_drop: bool,
    pub features: Vec<String>,
}

/// Explicit partial update: a field is mutated only when it is `Some`, so an
/// omitted or empty form value can never clobber stored data.
#[derive(Debug, Clone, Default)]
pub struct PackagePatch {
    pub destination: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub hotel_name: Option<String>,
    pub hotel_type: Option<HotelTier>,
    pub difficulty: Option<Difficulty>,
    pub price: Option<i64>,
    pub duration: Option<i64>,
    pub people_count: Option<i64>,
    pub rooms_count: Option<i64>,
    pub complementary_breakfast: Option<bool>,
    pub pick_and_drop: Option<bool>,
    pub features: Option<Vec<String>>,
}

impl PackagePatch {
    pub fn apply(self, package: &mut Package) {
        if let Some(v) = self.destination {
            package.destination = v;
        }
        if let Some(v) = self.description {
            package.description = v;
        }
        if let Some(v) = self.location {
            package.location = v;
        }
        if let Some(v) = self.hotel_name {
            package.hotel_name = v;
        }
        if let Some(v) = self.hotel_type {
            package.hotel_type = v;
        }
        if let Some(v) = self.difficulty {
            package.difficulty = v;
        }
        if let Some(v) = self.price {
            package.price = v;
        }
        if let Some(v) = self.duration {
            package.duration = v;
        }
        if let Some(v) = self.people_count {
            package.people_count = v;
        }
        if let Some(v) = self.rooms_count {
            package.rooms_count = v;
        }
        if let Some(v) = self.complementary_breakfast {
            package.complementary_breakfast = v;
        }
        if let Some(v) = self.pick_and_drop {
            package.pick_and_drop = v;
        }
        if let Some(v) = self.features {
            package.features = v;
        }
    }
}

/// Untyped field values as they arrive in a multipart form, before
/// normalization. Numbers and booleans come in as strings, features as a
/// JSON-encoded array (with a comma-split fallback).
#[derive(Debug, Clone, Default)]
pub struct RawPackageFields {
    pub destination: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub hotel_name: Option<String>,
    pub hotel_type: Option<String>,
    pub difficulty: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub people_count: Option<String>,
    pub rooms_count: Option<String>,
    pub complementary_breakfast: Option<String>,
    pub pick_and_drop: Option<String>,
    pub features: Option<String>,
}

impl RawPackageFields {
    /// Validates all required fields for a create, reporting every missing
    /// one by its public (camelCase) name.
    pub fn into_draft(self) -> AppResult<PackageDraft> {
        let mut missing = Vec::new();
        let destination = required(&mut missing, "destination", self.destination);
        let description = required(&mut missing, "description", self.description);
        let location = required(&mut missing, "location", self.location);
        let hotel_name = required(&mut missing, "hotelName", self.hotel_name);
        let hotel_type = required(&mut missing, "hotelType", self.hotel_type);
        let difficulty = required(&mut missing, "difficulty", self.difficulty);
        let price = required(&mut missing, "price", self.price);
        let duration = required(&mut missing, "duration", self.duration);
        let people_count = required(&mut missing, "peopleCount", self.people_count);
        let rooms_count = required(&mut missing, "roomsCount", self.rooms_count);

        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let (
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
        ) = (
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
        )
        else {
            return Err(AppError::ValidationError(
                "Missing required fields".to_string(),
            ));
        };

        Ok(PackageDraft {
            destination,
            description,
            location,
            hotel_name,
            hotel_type: parse_tier(&hotel_type)?,
            difficulty: parse_difficulty(&difficulty)?,
            price: parse_count("price", &price, 0)?,
            duration: parse_count("duration", &duration, 1)?,
            people_count: parse_count("peopleCount", &people_count, 1)?,
            rooms_count: parse_count("roomsCount", &rooms_count, 1)?,
            complementary_breakfast: self
                .complementary_breakfast
                .as_deref()
                .map(parse_flag)
                .unwrap_or(false),
            pick_and_drop: self.pick_and_drop.as_deref().map(parse_flag).unwrap_or(false),
            features: self.features.as_deref().map(parse_features).unwrap_or_default(),
        })
    }

    /// Builds a patch from whatever fields were supplied; empty strings are
    /// treated as "not supplied", matching the admin form behavior.
    pub fn into_patch(self) -> AppResult<PackagePatch> {
        let mut patch = PackagePatch::default();

        patch.destination = nonempty(self.destination);
        patch.description = nonempty(self.description);
        patch.location = nonempty(self.location);
        patch.hotel_name = nonempty(self.hotel_name);
        if let Some(v) = nonempty(self.hotel_type) {
            patch.hotel_type = Some(parse_tier(&v)?);
        }
        if let Some(v) = nonempty(self.difficulty) {
            patch.difficulty = Some(parse_difficulty(&v)?);
        }
        if let Some(v) = nonempty(self.price) {
            patch.price = Some(parse_count("price", &v, 0)?);
        }
        if let Some(v) = nonempty(self.duration) {
            patch.duration = Some(parse_count("duration", &v, 1)?);
        }
        if let Some(v) = nonempty(self.people_count) {
            patch.people_count = Some(parse_count("peopleCount", &v, 1)?);
        }
        if let Some(v) = nonempty(self.rooms_count) {
            patch.rooms_count = Some(parse_count("roomsCount", &v, 1)?);
        }
        if let Some(v) = nonempty(self.complementary_breakfast) {
            patch.complementary_breakfast = Some(parse_flag(&v));
        }
        if let Some(v) = nonempty(self.pick_and_drop) {
            patch.pick_and_drop = Some(parse_flag(&v));
        }
        if let Some(v) = nonempty(self.features) {
            patch.features = Some(parse_features(&v));
        }

        Ok(patch)
    }
}

fn required(
    missing: &mut Vec<&'static str>,
    name: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_tier(raw: &str) -> AppResult<HotelTier> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ValidationError(format!("Invalid hotelType: {}", raw)))
}

fn parse_difficulty(raw: &str) -> AppResult<Difficulty> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ValidationError(format!("Invalid difficulty: {}", raw)))
}

fn parse_count(field: &str, raw: &str, min: i64) -> AppResult<i64> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::ValidationError(format!("{} must be a number", field)))?;
    if value < min {
        return Err(AppError::ValidationError(format!(
            "{} must be at least {}",
            field, min
        )));
    }
    Ok(value)
}

/// Admin forms submit booleans as the strings "true"/"false".
pub fn parse_flag(raw: &str) -> bool {
    raw.trim() == "true"
}

/// Features arrive as a JSON-encoded array; fall back to comma splitting for
/// plain text input.
pub fn parse_features(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(features) => features,
        Err(_) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PackageResponse {
    pub success: bool,
    pub package: Package,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PackagesResponse {
    pub success: bool,
    pub packages: Vec<Package>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DeletePackageResponse {
    pub success: bool,
    pub message: String,
}
