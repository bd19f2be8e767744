//! App submission shapes.

use serde::{Deserialize, Serialize};

/// Submission request referencing a previously validated manifest upload.
#[derive(Clone, Debug, Deserialize)]
pub struct AppSubmitRequest {
    /// Upload record holding the manifest URL.
    pub upload: uuid::Uuid,
    /// Integer-coded premium type, as submitted by the form.
    pub premium_type: Option<i64>,
    /// Developer agreement checkbox.
    #[serde(default)]
    pub read_dev_agreement: bool,
}

/// Premium-type choices, integer-coded on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumType {
    Free,
    Premium,
    FreeInApp,
    PremiumInApp,
    PremiumOther,
}

impl PremiumType {
    /// The integer code used on the wire and in the search index.
    pub fn code(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Premium => 1,
            Self::FreeInApp => 2,
            Self::PremiumInApp => 3,
            Self::PremiumOther => 4,
        }
    }
}

impl TryFrom<i64> for PremiumType {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Free),
            1 => Ok(Self::Premium),
            2 => Ok(Self::FreeInApp),
            3 => Ok(Self::PremiumInApp),
            4 => Ok(Self::PremiumOther),
            other => Err(other),
        }
    }
}

/// Response for a successful submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppSubmitResponse {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub app_domain: String,
    pub manifest_url: String,
    pub premium_type: PremiumType,
}
