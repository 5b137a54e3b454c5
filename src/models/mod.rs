pub mod booking;
pub mod package;
