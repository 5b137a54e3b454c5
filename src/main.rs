#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

use std::sync::Arc;

use dotenv::dotenv;
use rocket::fairing::AdHoc;
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::*;
use tracing_subscriber::EnvFilter;

use travel_hub_api::db::{self, Database};
use travel_hub_api::routes;
use travel_hub_api::services::booking_service::BookingService;
use travel_hub_api::services::media_service::{HttpMediaStore, MediaStore};
use travel_hub_api::services::package_service::PackageService;
use travel_hub_api::swagger::swagger_ui;
use travel_hub_api::utils::config::Config;

#[get("/")]
fn index() -> &'static str {
    "Travel Hub backend server is up successfully..."
}

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("missing required environment variables");

    // Connect to the database and make sure the schema exists
    let database = Database::new(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::init_schema(database.get_pool())
        .await
        .expect("Failed to initialize database schema");

    // Explicitly constructed collaborators, injected into each service
    let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(&config));
    let package_service = PackageService::new(database.get_pool().clone(), media);
    let booking_service = BookingService::new(database.get_pool().clone());

    rocket::build()
        .manage(package_service)
        .manage(booking_service)
        .mount("/", rocket::routes![index])
        .mount(
            "/api",
            openapi_get_routes![
                routes::package_route::create_package,
                routes::package_route::get_packages,
                routes::package_route::get_package,
                routes::package_route::update_package,
                routes::package_route::delete_package,
                routes::booking_route::create_booking,
                routes::booking_route::get_user_bookings,
                routes::booking_route::cancel_booking,
                routes::booking_route::update_booking_status,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
