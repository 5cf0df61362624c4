//! Identity matching: which queries may be searched, and which candidates
//! count as current prisoners.

pub mod classifier;
pub mod rules;
pub mod service;

pub use classifier::{is_current, MatchedIdentity, INACTIVE_OUT};
pub use rules::{validate, IdentityQuery, ValidationOutcome};
pub use service::{MatchService, PrisonerMatch};
