//! Voiceprint API clients.
//!
//! [`AsyncClient`] and [`BlockingClient`] drive the same
//! [`RequestPipeline`](voiceprint_core::RequestPipeline) over different
//! transports. [`ApiClient`] picks one from a [`ClientConfig`].

mod async_client;
mod blocking;

use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use voiceprint_core::auth::CredentialState;
use voiceprint_core::auth::recovery;
use voiceprint_core::endpoints::{self, AuthResponse, RefreshRequest};
use voiceprint_core::pipeline::{LogicalCall, RequestPipeline};
use voiceprint_core::transport::{HttpRequest, RequestBody};
use voiceprint_core::{ClientConfig, ExecutionMode, OnHttpError, ResolvedConfig, Result};

pub use async_client::AsyncClient;
pub use blocking::BlockingClient;

/// State shared by clones of one client.
#[derive(Debug)]
struct Shared {
    config: ResolvedConfig,
    refresh_url: String,
    credentials: RwLock<CredentialState>,
}

impl Shared {
    fn new(config: ResolvedConfig) -> Self {
        let refresh_url = config.base_url.endpoint(endpoints::REFRESH);
        let credentials = RwLock::new(CredentialState::new(config.api_key.clone()));
        Self {
            config,
            refresh_url,
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        self.config.base_url.endpoint(path)
    }

    fn pipeline(&self, call: LogicalCall) -> RequestPipeline {
        RequestPipeline::new(
            call,
            self.config.auto_refresh,
            self.config.timeout,
            &self.refresh_url,
        )
    }

    /// Read the credentials. The lock is released before returning.
    fn read<R>(&self, f: impl FnOnce(&CredentialState) -> R) -> R {
        let guard = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    /// Mutate the credentials. The lock is released before returning.
    fn write<R>(&self, f: impl FnOnce(&mut CredentialState) -> R) -> R {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    fn snapshot(&self) -> CredentialState {
        self.read(CredentialState::clone)
    }

    fn login_call(&self, on_error: OnHttpError) -> LogicalCall {
        LogicalCall::get(self.endpoint(endpoints::LOGIN)).on_error(on_error)
    }

    fn refresh_call(&self, on_error: OnHttpError) -> Result<LogicalCall> {
        let body = self.read(|state| {
            serde_json::to_value(RefreshRequest {
                refresh_token: state.refresh_token().map(|t| t.as_str()),
            })
        })?;
        Ok(LogicalCall::post(self.refresh_url.clone())
            .body(RequestBody::Json(body))
            .on_error(on_error))
    }

    fn logout_call(&self) -> LogicalCall {
        LogicalCall::post(self.endpoint(endpoints::LOGOUT)).on_error(OnHttpError::ReturnNone)
    }

    /// Apply a login/refresh body (partial update) and hand it back.
    fn apply_auth(&self, value: Value) -> AuthResponse {
        let response = AuthResponse::from_value(value);
        self.write(|state| state.apply_auth_response(&response));
        response
    }

    fn refresh_request(&self) -> HttpRequest {
        self.read(|state| {
            recovery::refresh_request(&self.config.base_url, state, self.config.timeout)
        })
    }

    fn login_request(&self) -> HttpRequest {
        self.read(|state| {
            recovery::login_request(&self.config.base_url, state, self.config.timeout)
        })
    }
}

/// A client in either execution mode.
#[derive(Debug, Clone)]
pub enum ApiClient {
    Blocking(BlockingClient),
    Async(AsyncClient),
}

impl ApiClient {
    /// Build the client the configuration's [`ExecutionMode`] asks for.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(match config.execution_mode() {
            ExecutionMode::Blocking => ApiClient::Blocking(BlockingClient::new(config)?),
            ExecutionMode::Async => ApiClient::Async(AsyncClient::new(config)?),
        })
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            ApiClient::Blocking(_) => ExecutionMode::Blocking,
            ApiClient::Async(_) => ExecutionMode::Async,
        }
    }

    pub fn as_async(&self) -> Option<&AsyncClient> {
        match self {
            ApiClient::Async(client) => Some(client),
            ApiClient::Blocking(_) => None,
        }
    }

    pub fn as_blocking(&self) -> Option<&BlockingClient> {
        match self {
            ApiClient::Blocking(client) => Some(client),
            ApiClient::Async(_) => None,
        }
    }
}
