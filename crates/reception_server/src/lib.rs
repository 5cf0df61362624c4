//! reception_server: REST surface over the reception core.

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
