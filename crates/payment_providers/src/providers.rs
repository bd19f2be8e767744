//! Concrete provider implementations.

pub mod bango;
pub mod boku;
pub mod reference;

pub use bango::Bango;
pub use boku::Boku;
pub use reference::Reference;
