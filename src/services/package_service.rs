use crate::models::package::{Package, PackageDraft, PackagePatch, PackageRow};
use crate::services::media_service::{ImageUpload, MediaStore};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

pub struct PackageService {
    pool: SqlitePool,
    media: Arc<dyn MediaStore>,
}

impl PackageService {
    pub fn new(pool: SqlitePool, media: Arc<dyn MediaStore>) -> Self {
        PackageService { pool, media }
    }

    /// Creates a package. The image is mandatory and is pushed to the media
    /// host first; only its URL is stored.
    pub async fn create_package(
        &self,
        draft: PackageDraft,
        image: Option<ImageUpload>,
    ) -> AppResult<Package> {
        let image =
            image.ok_or_else(|| AppError::ValidationError("Image is required".to_string()))?;
        let image_url = self.media.upload_image(image).await?;

        let now = Utc::now().naive_utc();
        let package = Package {
            id: Uuid::new_v4().to_string(),
            destination: draft.destination,
            description: draft.description,
            location: draft.location,
            hotel_name: draft.hotel_name,
            hotel_type: draft.hotel_type,
            difficulty: draft.difficulty,
            price: draft.price,
            duration: draft.duration,
            people_count: draft.people_count,
            rooms_count: draft.rooms_count,
            complementary_breakfast: draft.complementary_breakfast,
            pick_and_drop: draft.pick_and_drop,
            features: draft.features,
            image_url,
            created_at: now,
            updated_at: now,
        };

        let features_json = serde_json::to_string(&package.features)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO package
            (id, destination, description, location, hotel_name, hotel_type, difficulty,
             price, duration, people_count, rooms_count, complementary_breakfast,
             pick_and_drop, features, image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&package.id)
        .bind(&package.destination)
        .bind(&package.description)
        .bind(&package.location)
        .bind(&package.hotel_name)
        .bind(package.hotel_type.to_string())
        .bind(package.difficulty.to_string())
        .bind(package.price)
        .bind(package.duration)
        .bind(package.people_count)
        .bind(package.rooms_count)
        .bind(package.complementary_breakfast)
        .bind(package.pick_and_drop)
        .bind(&features_json)
        .bind(&package.image_url)
        .bind(package.created_at)
        .bind(package.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(package_id = %package.id, destination = %package.destination, "package created");
        Ok(package)
    }

    /// All packages, unfiltered and unpaginated.
    pub async fn get_packages(&self) -> AppResult<Vec<Package>> {
        let rows = sqlx::query_as::<_, PackageRow>("SELECT * FROM package")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Package::try_from).collect()
    }

    pub async fn get_package(&self, id: &str) -> AppResult<Package> {
        let row = sqlx::query_as::<_, PackageRow>("SELECT * FROM package WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        Package::try_from(row)
    }

    /// Applies a partial patch; a new image replaces the stored URL. The old
    /// media asset is left on the host.
    pub async fn update_package(
        &self,
        id: &str,
        patch: PackagePatch,
        image: Option<ImageUpload>,
    ) -> AppResult<Package> {
        let mut package = self.get_package(id).await?;

        if let Some(image) = image {
            package.image_url = self.media.upload_image(image).await?;
        }
        patch.apply(&mut package);
        package.updated_at = Utc::now().naive_utc();

        let features_json = serde_json::to_string(&package.features)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        sqlx::query(
            r#"
            UPDATE package
            SET destination = ?, description = ?, location = ?, hotel_name = ?,
                hotel_type = ?, difficulty = ?, price = ?, duration = ?,
                people_count = ?, rooms_count = ?, complementary_breakfast = ?,
                pick_and_drop = ?, features = ?, image_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&package.destination)
        .bind(&package.description)
        .bind(&package.location)
        .bind(&package.hotel_name)
        .bind(package.hotel_type.to_string())
        .bind(package.difficulty.to_string())
        .bind(package.price)
        .bind(package.duration)
        .bind(package.people_count)
        .bind(package.rooms_count)
        .bind(package.complementary_breakfast)
        .bind(package.pick_and_drop)
        .bind(&features_json)
        .bind(&package.image_url)
        .bind(package.updated_at)
        .bind(&package.id)
        .execute(&self.pool)
        .await?;

        tracing::info!(package_id = %package.id, "package updated");
        Ok(package)
    }

    /// Hard delete. Bookings referencing the package are not touched.
    pub async fn delete_package(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM package WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Package not found".to_string()));
        }

        tracing::info!(package_id = %id, "package deleted");
        Ok(())
    }
}
