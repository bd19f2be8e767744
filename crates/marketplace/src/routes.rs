//! HTTP surface: app state, scope builders and request handlers.

pub mod app;
pub mod health;
pub mod payments;
pub mod recommendations;
pub mod search;
pub mod submit;

pub use app::AppState;
