//! Serde types describing the public HTTP surface of the marketplace:
//! search, suggestions, recommendations, app submission and payment-account
//! management.

pub mod errors;
pub mod payments;
pub mod recommendations;
pub mod search;
pub mod submission;
