#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//! Utilities shared across the marketplace crates: error aliases, the remote
//! request model and small parsing/crypto helpers.

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod ext_traits;
pub mod request;
