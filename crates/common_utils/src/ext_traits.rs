//! Extension traits for parsing remote payloads.

use error_stack::{IntoReport, ResultExt};
use serde::Deserialize;

use crate::errors::{self, CustomResult};

/// Parsing `bytes::Bytes` into a structured type.
pub trait BytesExt<T> {
    /// Convert `bytes::Bytes` into type `T` using `serde::Deserialize`.
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>;
}

impl<T> BytesExt<T> for bytes::Bytes {
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, errors::ParsingError>
    where
        T: Deserialize<'de>,
    {
        use bytes::Buf;

        serde_json::from_slice::<T>(self.chunk())
            .into_report()
            .change_context(errors::ParsingError)
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from bytes"))
    }
}

