//!
//! Structure describing a secret.
//!

use std::{fmt, marker::PhantomData};

use crate::{strategy::Strategy, PeekInterface};

/// A wrapper around a value that must not leak through `Debug` output.
///
/// To get access to the value use `peek()` from [`crate::PeekInterface`]
/// (borrowing) or `expose()` from [`crate::ExposeInterface`] (consuming).
/// The second type parameter selects the masking [`Strategy`] used when the
/// secret is formatted.
pub struct Secret<S, I = crate::WithType>
where
    I: Strategy<S>,
{
    pub(crate) inner_secret: S,
    pub(crate) marker: PhantomData<I>,
}

impl<S, I> Secret<S, I>
where
    I: Strategy<S>,
{
    /// Take ownership of a secret value.
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }

    /// Map the inner secret to another secret.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Secret<T>
    where
        crate::WithType: Strategy<T>,
    {
        Secret::new(f(self.inner_secret))
    }
}

impl<S, I> PeekInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I> From<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for Secret<String> {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_owned())
    }
}

impl<S, I> Clone for Secret<S, I>
where
    S: Clone,
    I: Strategy<S>,
{
    fn clone(&self) -> Self {
        Self {
            inner_secret: self.inner_secret.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, I> PartialEq for Secret<S, I>
where
    S: PartialEq,
    I: Strategy<S>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek().eq(other.peek())
    }
}

impl<S, I> Eq for Secret<S, I>
where
    S: Eq,
    I: Strategy<S>,
{
}

impl<S, I> fmt::Debug for Secret<S, I>
where
    I: Strategy<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S, I> Default for Secret<S, I>
where
    S: Default,
    I: Strategy<S>,
{
    fn default() -> Self {
        S::default().into()
    }
}
