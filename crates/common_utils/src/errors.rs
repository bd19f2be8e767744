//! Errors and error specific types for universal use

/// A custom datatype that wraps the error variant `E` into a report, allowing
/// `error_stack::Report<E>` specific extendability.
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failure while parsing bytes or a string into a structured type.
#[derive(Debug, thiserror::Error)]
#[error("Parsing error")]
pub struct ParsingError;
