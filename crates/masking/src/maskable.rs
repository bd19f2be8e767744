//! Optionally masked values, used for header maps where only some entries
//! carry credentials.

use crate::{ExposeInterface, Secret};

/// A value that is either masked behind a [`Secret`] or stored as-is.
#[derive(Clone, Eq, PartialEq)]
pub enum Maskable<T: Eq + PartialEq + Clone> {
    /// Variant which masks the data by wrapping it in a `Secret`.
    Masked(Secret<T>),
    /// Variant which doesn't mask the data.
    Normal(T),
}

impl<T: std::fmt::Debug + Clone + Eq + PartialEq> std::fmt::Debug for Maskable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Masked(secret_value) => std::fmt::Debug::fmt(secret_value, f),
            Self::Normal(value) => std::fmt::Debug::fmt(value, f),
        }
    }
}

impl<T: Eq + PartialEq + Clone + std::hash::Hash> std::hash::Hash for Maskable<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Masked(value) => crate::PeekInterface::peek(value).hash(state),
            Self::Normal(value) => value.hash(state),
        }
    }
}

impl<T: Eq + PartialEq + Clone> Maskable<T> {
    /// Get the inner data while consuming self.
    pub fn into_inner(self) -> T {
        match self {
            Self::Masked(inner_secret) => inner_secret.expose(),
            Self::Normal(inner) => inner,
        }
    }

    /// Whether this value is masked.
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Masked(_))
    }
}

/// Conversion into a masked [`Maskable`] value.
pub trait Mask {
    /// Inner type of the produced `Maskable`.
    type Output: Eq + Clone + PartialEq;

    /// Wrap self as masked data.
    fn into_masked(self) -> Maskable<Self::Output>;
}

impl Mask for String {
    type Output = Self;

    fn into_masked(self) -> Maskable<Self::Output> {
        Maskable::Masked(self.into())
    }
}

impl Mask for Secret<String> {
    type Output = String;

    fn into_masked(self) -> Maskable<Self::Output> {
        Maskable::Masked(self)
    }
}

impl<T: Eq + PartialEq + Clone> From<T> for Maskable<T> {
    fn from(value: T) -> Self {
        Self::Normal(value)
    }
}

impl From<&str> for Maskable<String> {
    fn from(value: &str) -> Self {
        Self::Normal(value.to_owned())
    }
}
