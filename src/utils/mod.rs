//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::digests_match;
pub use validation::{validate_link, validate_network};
