#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Wrapper types and traits for secret management which help ensure secrets
//! aren't accidentally logged or otherwise exposed through `Debug` output.
//!

mod strategy;
pub use strategy::{Strategy, WithType, WithoutType};

mod abs;
pub use abs::{ExposeInterface, ExposeOptionInterface, PeekInterface};

mod secret;
pub use secret::Secret;

mod serde_impl;

pub mod maskable;
pub use maskable::{Mask, Maskable};

/// This module should be included with asterisk.
///
/// `use masking::prelude::*;`
///
pub mod prelude {
    pub use super::{ExposeInterface, ExposeOptionInterface, PeekInterface};
}
