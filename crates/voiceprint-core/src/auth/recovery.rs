//! Single-shot re-authentication exchanges.
//!
//! After a 403 the pipeline's driver first tries a token refresh and then a
//! fresh login. Each attempt is exactly one transport call that bypasses the
//! pipeline. The helpers here build those requests and decide whether a
//! response is good enough to replace the held tokens. They never raise: any
//! failure reads as `false`.

use std::time::Duration;

use serde_json::json;
use tracing::warn;

use crate::endpoints::{self, AuthResponse};
use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody};
use crate::types::BaseUrl;

use super::CredentialState;

/// POST `/refresh` carrying the held refresh token (or `null`).
pub fn refresh_request(
    base_url: &BaseUrl,
    credentials: &CredentialState,
    timeout: Duration,
) -> HttpRequest {
    let refresh_token = credentials.refresh_token().map(|t| t.as_str());
    let body = json!({ "refresh_token": refresh_token });
    request(
        Method::Post,
        base_url.endpoint(endpoints::REFRESH),
        RequestBody::Json(body),
        credentials,
        timeout,
    )
}

/// GET `/login` with the API key.
pub fn login_request(
    base_url: &BaseUrl,
    credentials: &CredentialState,
    timeout: Duration,
) -> HttpRequest {
    request(
        Method::Get,
        base_url.endpoint(endpoints::LOGIN),
        RequestBody::Empty,
        credentials,
        timeout,
    )
}

fn request(
    method: Method,
    url: String,
    body: RequestBody,
    credentials: &CredentialState,
    timeout: Duration,
) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![(
            "Authorization".to_string(),
            credentials.api_key().authorization(),
        )],
        params: Vec::new(),
        body,
        cookies: credentials.cookies().clone(),
        timeout,
    }
}

/// Judge the outcome of a recovery exchange and update the tokens.
///
/// Only a 200 whose body carries both `token` and `refresh_token` counts;
/// then both tokens are replaced. The cookie jar is never touched here.
pub fn absorb(
    outcome: Result<HttpResponse, TransportError>,
    credentials: &mut CredentialState,
) -> bool {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "Recovery request failed");
            return false;
        }
    };

    if response.status != 200 {
        warn!(status = response.status, "Recovery request rejected");
        return false;
    }

    let value = match response.json() {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "Recovery response is not JSON");
            return false;
        }
    };

    let accepted = credentials.accept_complete(&AuthResponse::from_value(value));
    if !accepted {
        warn!("Recovery response lacks token or refresh_token");
    }
    accepted
}
