//! Service base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The hosted voiceprint API.
pub const DEFAULT_BASE_URL: &str = "https://voiceprint.disnana.com/api";

/// A validated API base URL.
///
/// Endpoints are built by appending a path segment such as `/login`.
/// The URL must use HTTP or HTTPS. Plain HTTP to a non-loopback host is
/// accepted with a warning.
///
/// # Example
///
/// ```
/// use voiceprint_core::BaseUrl;
///
/// let base = BaseUrl::new("https://voiceprint.disnana.com/api/").unwrap();
/// assert_eq!(base.endpoint("/login"), "https://voiceprint.disnana.com/api/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::BaseUrl {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);

        Ok(Self(url))
    }

    /// The hosted service endpoint.
    pub fn hosted() -> Result<Self, Error> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Returns the full URL for an endpoint path like `/files`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let Some(host) = url.host_str() else {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        };

        match url.scheme() {
            "https" => {}
            "http" => {
                let is_loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
                if !is_loopback {
                    warn!(host, "Base URL uses plain HTTP; credentials will be sent unencrypted");
                }
            }
            _ => {
                return Err(InvalidInputError::BaseUrl {
                    value: original.to_string(),
                    reason: "must use http or https".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim_end_matches('/'))
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
