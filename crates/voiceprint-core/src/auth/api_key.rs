//! API key type.

use std::fmt;

use crate::error::InvalidInputError;

/// The account API key.
///
/// The key is fixed for a client's lifetime and is sent on every request as
/// `Authorization: Bearer <key>`, including after login has issued an access
/// token.
///
/// # Security
///
/// The key is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use voiceprint_core::ApiKey;
///
/// let key = ApiKey::new("vp_live_123").unwrap();
/// assert_eq!(key.authorization(), "Bearer vp_live_123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate an API key.
    ///
    /// The key must be non-empty and consist of visible ASCII so that it is
    /// always a legal header value.
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidInputError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(InvalidInputError::ApiKey {
                reason: "must not be empty".to_string(),
            });
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidInputError::ApiKey {
                reason: "must contain only visible ASCII characters".to_string(),
            });
        }
        Ok(Self(key))
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}
