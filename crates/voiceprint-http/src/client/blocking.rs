//! Blocking client.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use voiceprint_core::auth::{CredentialState, recovery};
use voiceprint_core::error::AuthError;
use voiceprint_core::pipeline::{LogicalCall, Step};
use voiceprint_core::transport::BlockingTransport;
use voiceprint_core::{
    AuthResponse, BaseUrl, BlockingVoiceprintClient, ClientConfig, LogoutPolicy, OnHttpError,
    ResolvedConfig, Result,
};

use super::Shared;
use crate::service::BlockingVoiceprint;
use crate::transport::BlockingReqwestTransport;

/// Voiceprint client for synchronous code.
///
/// Every call blocks the current thread until the exchange finishes. Do not
/// use it from inside an async runtime; use [`AsyncClient`](super::AsyncClient)
/// there.
#[derive(Clone)]
pub struct BlockingClient<T = BlockingReqwestTransport> {
    shared: Arc<Shared>,
    transport: T,
}

impl BlockingClient<BlockingReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.resolve()?;
        Ok(Self::with_transport(config, BlockingReqwestTransport::new()?))
    }
}

impl<T: BlockingTransport> BlockingClient<T> {
    pub fn with_transport(config: ResolvedConfig, transport: T) -> Self {
        Self {
            shared: Arc::new(Shared::new(config)),
            transport,
        }
    }

    pub fn voiceprint(&self) -> BlockingVoiceprint<'_, Self> {
        BlockingVoiceprint::new(self)
    }

    fn recover(&self) -> bool {
        self.try_refresh_session() || self.try_relogin()
    }

    fn exchange(&self, request: voiceprint_core::HttpRequest) -> bool {
        let outcome = self.transport.execute(request);
        self.shared.write(|state| recovery::absorb(outcome, state))
    }
}

impl<T: BlockingTransport> BlockingVoiceprintClient for BlockingClient<T> {
    fn base_url(&self) -> &BaseUrl {
        &self.shared.config.base_url
    }

    fn credentials(&self) -> CredentialState {
        self.shared.snapshot()
    }

    #[instrument(skip(self, call), fields(method = call.method.as_str(), url = %call.url))]
    fn send(&self, call: LogicalCall) -> Result<Option<Value>> {
        let mut pipeline = self.shared.pipeline(call);
        let mut step = Step::Send;
        loop {
            step = match step {
                Step::Send => {
                    let request = self.shared.read(|state| pipeline.next_request(state));
                    let response = self.transport.execute(request)?;
                    self.shared
                        .write(|state| pipeline.on_response(response, state))?
                }
                Step::Recover => pipeline.on_recovery(self.recover())?,
                Step::Done(value) => return Ok(value),
            };
        }
    }

    #[instrument(skip(self))]
    fn login(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>> {
        info!("Logging in");
        let value = self.send(self.shared.login_call(on_error))?;
        Ok(value.map(|v| self.shared.apply_auth(v)))
    }

    #[instrument(skip(self))]
    fn refresh(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>> {
        debug!("Refreshing tokens");
        let value = self.send(self.shared.refresh_call(on_error)?)?;
        Ok(value.map(|v| self.shared.apply_auth(v)))
    }

    #[instrument(skip(self))]
    fn logout(&self) -> Result<Option<Value>> {
        match self.send(self.shared.logout_call())? {
            Some(body) => {
                self.shared.write(CredentialState::clear);
                info!("Logged out");
                Ok(Some(body))
            }
            None => match self.shared.config.logout_policy {
                LogoutPolicy::Strict => Err(AuthError::LogoutFailed.into()),
                LogoutPolicy::Lenient => {
                    warn!("Logout failed, keeping tokens");
                    Ok(None)
                }
            },
        }
    }

    fn try_refresh_session(&self) -> bool {
        self.exchange(self.shared.refresh_request())
    }

    fn try_relogin(&self) -> bool {
        self.exchange(self.shared.login_request())
    }
}

impl<T> std::fmt::Debug for BlockingClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("base_url", &self.shared.config.base_url.as_str())
            .field("auto_refresh", &self.shared.config.auto_refresh)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
