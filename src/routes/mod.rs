pub mod booking_route;
pub mod package_route;
