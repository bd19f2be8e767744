//! The marketplace application server.
//!
//! Wires the search API, app submission, the recommendation proxy and the
//! payment-account endpoints onto actix-web. Domain logic lives under
//! [`core`]; HTTP handlers under [`routes`] stay thin.

pub mod configs;
pub mod core;
pub mod db;
pub mod routes;

pub use self::configs::settings::Settings;
pub use self::routes::app::AppState;
