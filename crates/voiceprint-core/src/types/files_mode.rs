//! Response shape selector for the file listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Shape of the `/files` listing, sent as the `mode` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilesMode {
    /// Files grouped per target (`mode=dict`).
    #[default]
    #[serde(rename = "dict")]
    Nested,
    /// Flat list of files (`mode=list`).
    #[serde(rename = "list")]
    List,
}

impl FilesMode {
    /// Returns the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            FilesMode::Nested => "dict",
            FilesMode::List => "list",
        }
    }
}

impl fmt::Display for FilesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilesMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dict" | "nested" => Ok(FilesMode::Nested),
            "list" => Ok(FilesMode::List),
            other => Err(InvalidInputError::FilesMode {
                value: other.to_string(),
            }
            .into()),
        }
    }
}
