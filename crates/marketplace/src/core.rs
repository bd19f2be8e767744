//! Domain logic behind the HTTP handlers.

pub mod collections;
pub mod errors;
pub mod manifest;
pub mod payments;
pub mod recommendations;
pub mod search;
pub mod submit;
