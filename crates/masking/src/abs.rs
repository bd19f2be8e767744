//! Interfaces to reach inside a secret on purpose.

use crate::{strategy::Strategy, Secret};

/// Interface to immutably peek at the inner value without consuming it.
pub trait PeekInterface<S> {
    /// Borrow the inner secret value.
    fn peek(&self) -> &S;
}

/// Interface that consumes the wrapper and returns the inner value.
pub trait ExposeInterface<S> {
    /// Consume the secret and return the inner value.
    fn expose(self) -> S;
}

/// Expose an optional secret, falling back to the default for `None`.
pub trait ExposeOptionInterface<S> {
    /// Expose the inner value or its default.
    fn expose_option(self) -> S;
}

impl<S, I> ExposeInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn expose(self) -> S {
        self.inner_secret
    }
}

impl<S, I> ExposeOptionInterface<Option<S>> for Option<Secret<S, I>>
where
    I: Strategy<S>,
{
    fn expose_option(self) -> Option<S> {
        self.map(ExposeInterface::expose)
    }
}

impl<I> ExposeOptionInterface<String> for Option<Secret<String, I>>
where
    I: Strategy<String>,
{
    fn expose_option(self) -> String {
        self.map(ExposeInterface::expose).unwrap_or_default()
    }
}
