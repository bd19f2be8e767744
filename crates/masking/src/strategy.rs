use std::fmt;

/// Debug-masking strategy for a secret of type `T`.
pub trait Strategy<T> {
    /// Format the masked representation of the value.
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Masks the value while printing its type name.
#[derive(Debug)]
pub enum WithType {}

impl<T> Strategy<T> for WithType {
    fn fmt(_value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("*** ")?;
        f.write_str(std::any::type_name::<T>())?;
        f.write_str(" ***")
    }
}

/// Masks the value without revealing anything about it.
#[derive(Debug)]
pub enum WithoutType {}

impl<T> Strategy<T> for WithoutType {
    fn fmt(_value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("*** ***")
    }
}
