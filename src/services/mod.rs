pub mod booking_service;
pub mod media_service;
pub mod package_service;
