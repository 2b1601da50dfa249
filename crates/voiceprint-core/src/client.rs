//! Client traits.
//!
//! [`VoiceprintClient`] and [`BlockingVoiceprintClient`] are the same
//! operation set in the two execution models. Implementors provide the
//! pipeline driver ([`send`](VoiceprintClient::send)) and the auth
//! exchanges; request helpers and [`ensure_authenticated`] come for free.
//!
//! [`ensure_authenticated`]: VoiceprintClient::ensure_authenticated

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::auth::CredentialState;
use crate::config::OnHttpError;
use crate::endpoints::AuthResponse;
use crate::error::AuthError;
use crate::pipeline::LogicalCall;
use crate::transport::RequestBody;
use crate::types::BaseUrl;

/// Non-blocking voiceprint client.
#[async_trait]
pub trait VoiceprintClient: Send + Sync {
    /// The API base URL.
    fn base_url(&self) -> &BaseUrl;

    /// A snapshot of the current credentials.
    fn credentials(&self) -> CredentialState;

    /// Run one logical call through the request pipeline.
    async fn send(&self, call: LogicalCall) -> Result<Option<Value>>;

    /// GET `/login`; applies whichever tokens come back.
    async fn login(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>>;

    /// POST `/refresh`; applies whichever tokens come back.
    async fn refresh(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>>;

    /// POST `/logout` and drop the tokens.
    async fn logout(&self) -> Result<Option<Value>>;

    /// One direct refresh exchange, outside the pipeline.
    async fn try_refresh_session(&self) -> bool;

    /// One direct login exchange, outside the pipeline.
    async fn try_relogin(&self) -> bool;

    /// GET an endpoint path such as `/files`.
    async fn get(
        &self,
        path: &str,
        params: Vec<(String, String)>,
        on_error: OnHttpError,
    ) -> Result<Option<Value>> {
        let mut call = LogicalCall::get(self.base_url().endpoint(path)).on_error(on_error);
        call.params = params;
        self.send(call).await
    }

    /// POST to an endpoint path.
    async fn post(
        &self,
        path: &str,
        body: RequestBody,
        on_error: OnHttpError,
    ) -> Result<Option<Value>> {
        let call = LogicalCall::post(self.base_url().endpoint(path))
            .body(body)
            .on_error(on_error);
        self.send(call).await
    }

    /// Make sure the client holds a token pair.
    ///
    /// Refreshes when a refresh token is held, falling back to login.
    async fn ensure_authenticated(&self) -> Result<AuthResponse> {
        if self.credentials().refresh_token().is_some() {
            debug!("Refreshing held session");
            let refreshed = self.refresh(OnHttpError::ReturnNone).await?;
            if refreshed.is_some() {
                return complete_or_expired(refreshed);
            }
            return present_or_expired(self.login(OnHttpError::ReturnNone).await?);
        }

        debug!("No refresh token held, logging in");
        complete_or_expired(self.login(OnHttpError::ReturnNone).await?)
    }
}

/// Blocking voiceprint client. Must not be called from an async runtime thread.
pub trait BlockingVoiceprintClient: Send + Sync {
    fn base_url(&self) -> &BaseUrl;

    fn credentials(&self) -> CredentialState;

    fn send(&self, call: LogicalCall) -> Result<Option<Value>>;

    fn login(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>>;

    fn refresh(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>>;

    fn logout(&self) -> Result<Option<Value>>;

    fn try_refresh_session(&self) -> bool;

    fn try_relogin(&self) -> bool;

    fn get(
        &self,
        path: &str,
        params: Vec<(String, String)>,
        on_error: OnHttpError,
    ) -> Result<Option<Value>> {
        let mut call = LogicalCall::get(self.base_url().endpoint(path)).on_error(on_error);
        call.params = params;
        self.send(call)
    }

    fn post(&self, path: &str, body: RequestBody, on_error: OnHttpError) -> Result<Option<Value>> {
        let call = LogicalCall::post(self.base_url().endpoint(path))
            .body(body)
            .on_error(on_error);
        self.send(call)
    }

    fn ensure_authenticated(&self) -> Result<AuthResponse> {
        if self.credentials().refresh_token().is_some() {
            debug!("Refreshing held session");
            let refreshed = self.refresh(OnHttpError::ReturnNone)?;
            if refreshed.is_some() {
                return complete_or_expired(refreshed);
            }
            return present_or_expired(self.login(OnHttpError::ReturnNone)?);
        }

        debug!("No refresh token held, logging in");
        complete_or_expired(self.login(OnHttpError::ReturnNone)?)
    }
}

fn complete_or_expired(response: Option<AuthResponse>) -> Result<AuthResponse> {
    match response {
        Some(response) if response.is_complete() => Ok(response),
        _ => Err(AuthError::TokenExpired.into()),
    }
}

fn present_or_expired(response: Option<AuthResponse>) -> Result<AuthResponse> {
    response.ok_or_else(|| AuthError::TokenExpired.into())
}
