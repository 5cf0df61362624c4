//! Reception core
//!
//! Identity matching and arrival deduplication for prison reception:
//!
//! - [`matching`] - which identifying fields are enough to search the
//!   registry, and which candidates count as current prisoners
//! - [`booking`] - whether a booking already exists for a
//!   (prison, movement, prisoner, booking) tuple inside a time window
//! - [`scan`] - yearly scan counts per person, with missing persons zero-filled
//!
//! Network and storage collaborators are reached only through the traits in
//! [`ports`]. Nothing here holds state between calls apart from the
//! in-memory record store.

pub mod booking;
pub mod error;
pub mod matching;
pub mod ports;
pub mod scan;

pub use error::{Collaborator, FieldError, ReceptionError, Result};
