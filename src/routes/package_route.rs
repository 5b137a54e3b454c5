use crate::models::package::{
    DeletePackageResponse, PackageResponse, PackagesResponse, RawPackageFields,
};
use crate::services::media_service::ImageUpload;
use crate::services::package_service::PackageService;
use crate::utils::error::AppError;
use crate::utils::upload::read_temp_file;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use rocket::{delete, get, post, put, FromForm};
use rocket_okapi::openapi;

/// Multipart fields for package create and update. Everything is optional at
/// the form level; create-time requirements are checked during
/// normalization so every missing field can be reported at once.
#[derive(FromForm)]
pub struct PackageForm<'r> {
    pub destination: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[field(name = "hotelName")]
    pub hotel_name: Option<String>,
    #[field(name = "hotelType")]
    pub hotel_type: Option<String>,
    pub difficulty: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    #[field(name = "peopleCount")]
    pub people_count: Option<String>,
    #[field(name = "roomsCount")]
    pub rooms_count: Option<String>,
    #[field(name = "complementaryBreakfast")]
    pub complementary_breakfast: Option<String>,
    #[field(name = "pickAndDrop")]
    pub pick_and_drop: Option<String>,
    pub features: Option<String>,
    pub image: Option<TempFile<'r>>,
}

impl PackageForm<'_> {
    fn fields(&self) -> RawPackageFields {
        RawPackageFields {
            destination: self.destination.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            hotel_name: self.hotel_name.clone(),
            hotel_type: self.hotel_type.clone(),
            difficulty: self.difficulty.clone(),
            price: self.price.clone(),
            duration: self.duration.clone(),
            people_count: self.people_count.clone(),
            rooms_count: self.rooms_count.clone(),
            complementary_breakfast: self.complementary_breakfast.clone(),
            pick_and_drop: self.pick_and_drop.clone(),
            features: self.features.clone(),
        }
    }
}

async fn read_image(file: &mut Option<TempFile<'_>>) -> Result<Option<ImageUpload>, AppError> {
    let Some(file) = file.as_mut() else {
        return Ok(None);
    };
    let content_type = file.content_type().map(|c| c.to_string());
    let bytes = read_temp_file(file)
        .await
        .map_err(|e| AppError::UploadError(e.to_string()))?;
    Ok(Some(ImageUpload {
        bytes,
        content_type,
    }))
}

#[openapi(skip)]
#[post("/package/create", data = "<form>")]
pub async fn create_package(
    form: Form<PackageForm<'_>>,
    package_service: &State<PackageService>,
) -> Result<status::Created<Json<PackageResponse>>, AppError> {
    let mut form = form.into_inner();
    let image = read_image(&mut form.image).await?;
    let draft = form.fields().into_draft()?;

    let package = package_service.create_package(draft, image).await?;
    let location = format!("/api/package/get/{}", package.id);
    Ok(status::Created::new(location).body(Json(PackageResponse {
        success: true,
        package,
    })))
}

/// List all packages
#[openapi(tag = "Packages")]
#[get("/package/getPackages")]
pub async fn get_packages(
    package_service: &State<PackageService>,
) -> Result<Json<PackagesResponse>, AppError> {
    let packages = package_service.get_packages().await?;
    Ok(Json(PackagesResponse {
        success: true,
        packages,
    }))
}

/// Package details by id
#[openapi(tag = "Packages")]
#[get("/package/get/<id>")]
pub async fn get_package(
    id: &str,
    package_service: &State<PackageService>,
) -> Result<Json<PackageResponse>, AppError> {
    let package = package_service.get_package(id).await?;
    Ok(Json(PackageResponse {
        success: true,
        package,
    }))
}

#[openapi(skip)]
#[put("/package/update/<id>", data = "<form>")]
pub async fn update_package(
    id: &str,
    form: Form<PackageForm<'_>>,
    package_service: &State<PackageService>,
) -> Result<Json<PackageResponse>, AppError> {
    let mut form = form.into_inner();
    let image = read_image(&mut form.image).await?;
    let patch = form.fields().into_patch()?;

    let package = package_service.update_package(id, patch, image).await?;
    Ok(Json(PackageResponse {
        success: true,
        package,
    }))
}

/// Delete a package
#[openapi(tag = "Packages")]
#[delete("/package/delete/<id>")]
pub async fn delete_package(
    id: &str,
    package_service: &State<PackageService>,
) -> Result<Json<DeletePackageResponse>, AppError> {
    package_service.delete_package(id).await?;
    Ok(Json(DeletePackageResponse {
        success: true,
        message: "Package deleted successfully".to_string(),
    }))
}
