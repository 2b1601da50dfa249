//! Endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// GET, authenticates with the API key.
pub const LOGIN: &str = "/login";

/// POST, drops the server session.
pub const LOGOUT: &str = "/logout";

/// POST, exchanges a refresh token for new tokens.
pub const REFRESH: &str = "/refresh";

/// GET, lists uploaded voiceprint files.
pub const FILES: &str = "/files";

/// POST multipart, uploads an audio file.
pub const UPLOAD: &str = "/upload";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for `/refresh`.
///
/// A missing refresh token is still sent (as `null`); the server decides.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: Option<&'a str>,
}

/// Response from `/login` and `/refresh`.
///
/// Either token may be absent. Everything else the server sends is kept in
/// `extra` so callers still see the full body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthResponse {
    /// Interpret a response body. Non-object bodies carry no tokens.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let token = take_string(&mut map, "token");
                let refresh_token = take_string(&mut map, "refresh_token");
                Self {
                    token,
                    refresh_token,
                    extra: map,
                }
            }
            _ => Self::default(),
        }
    }

    /// True when both tokens are present.
    pub fn is_complete(&self) -> bool {
        self.token.is_some() && self.refresh_token.is_some()
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// Error marker the server puts in a 403 body for banned accounts.
pub const ACCOUNT_BANNED: &str = "account_banned";

/// Returns the ban reason if a 403 body carries the account-banned marker.
pub fn banned_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if value.get("error").and_then(Value::as_str) != Some(ACCOUNT_BANNED) {
        return None;
    }
    let reason = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("account banned by the server");
    Some(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_keeps_extra_fields() {
        let response = AuthResponse::from_value(json!({
            "token": "t1",
            "refresh_token": "r1",
            "expires_in": 3600
        }));
        assert!(response.is_complete());
        assert_eq!(response.token.as_deref(), Some("t1"));
        assert_eq!(response.extra["expires_in"], 3600);
    }

    #[test]
    fn partial_auth_response_is_not_complete() {
        let response = AuthResponse::from_value(json!({"token": "t2"}));
        assert!(!response.is_complete());
        assert!(response.refresh_token.is_none());
        assert_eq!(AuthResponse::from_value(json!(null)), AuthResponse::default());
    }

    #[test]
    fn refresh_request_sends_null_without_token() {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: None,
        })
        .unwrap();
        assert_eq!(body, json!({"refresh_token": null}));
    }

    #[test]
    fn banned_marker_is_detected() {
        let body = r#"{"error":"account_banned","message":"terms violation"}"#;
        assert_eq!(banned_reason(body).as_deref(), Some("terms violation"));
        assert_eq!(banned_reason(r#"{"error":"forbidden"}"#), None);
        assert_eq!(banned_reason("Forbidden"), None);
    }
}
