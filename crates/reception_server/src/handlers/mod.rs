pub mod bookings;
pub mod health;
pub mod matching;
pub mod scan_limits;
