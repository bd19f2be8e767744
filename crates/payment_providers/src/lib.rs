#![forbid(unsafe_code)]

//! Abstraction over third-party billing backends ("providers").
//!
//! A [`provider::Provider`] maps the marketplace's account/product/terms
//! operations onto one remote billing API. All remote traffic is described
//! with `common_utils::request` types and executed through the
//! [`client::RequestExecutor`] seam so the whole layer is testable against
//! canned responses.

pub mod client;
pub mod errors;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod transformers;
pub mod types;

pub use provider::Provider;
pub use providers::{Bango, Boku, Reference};
pub use registry::{get_provider, get_providers};
