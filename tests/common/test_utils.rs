#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use travel_hub_api::db;
use travel_hub_api::models::package::{Difficulty, HotelTier, Package, PackageDraft};
use travel_hub_api::services::media_service::{ImageUpload, MediaStore};
use travel_hub_api::services::package_service::PackageService;
use travel_hub_api::utils::error::{AppError, AppResult};

// A fresh in-memory database per test. The pool is pinned to a single
// connection because every sqlite::memory: connection is its own database.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}

/// Media host stand-in that hands out unique URLs and counts uploads.
pub struct FakeMediaStore {
    uploads: AtomicUsize,
}

impl FakeMediaStore {
    pub fn new() -> Self {
        FakeMediaStore {
            uploads: AtomicUsize::new(0),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload_image(&self, _image: ImageUpload) -> AppResult<String> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://media.test/travel_packages/{}.jpg", n))
    }
}

/// Media host stand-in that always rejects the upload.
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn upload_image(&self, _image: ImageUpload) -> AppResult<String> {
        Err(AppError::UploadError(
            "media host rejected the upload".to_string(),
        ))
    }
}

pub fn sample_image() -> ImageUpload {
    ImageUpload {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        content_type: Some("image/jpeg".to_string()),
    }
}

// Matches the reference pricing scenario: 50,000 PKR per person, 5 days,
// STANDARD hotel included.
pub fn sample_draft() -> PackageDraft {
    PackageDraft {
        destination: "Hunza Valley".to_string(),
        description: "Guided tour through Northern Pakistan".to_string(),
        location: "Gilgit-Baltistan".to_string(),
        hotel_name: "Hunza Serena Inn".to_string(),
        hotel_type: HotelTier::Standard,
        difficulty: Difficulty::Moderate,
        price: 50_000,
        duration: 5,
        people_count: 8,
        rooms_count: 4,
        complementary_breakfast: true,
        pick_and_drop: false,
        features: vec!["Tour Guide".to_string(), "Travel Insurance".to_string()],
    }
}

pub async fn seed_package(package_service: &PackageService) -> AppResult<Package> {
    package_service
        .create_package(sample_draft(), Some(sample_image()))
        .await
}
