//! Backend for the Travel Hub booking platform: package catalog, booking
//! lifecycle, and price quoting over SQLite.

pub mod db;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;
