//! Non-blocking client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use voiceprint_core::auth::{CredentialState, recovery};
use voiceprint_core::error::AuthError;
use voiceprint_core::pipeline::{LogicalCall, Step};
use voiceprint_core::transport::Transport;
use voiceprint_core::{
    AuthResponse, BaseUrl, ClientConfig, LogoutPolicy, OnHttpError, ResolvedConfig, Result,
    VoiceprintClient,
};

use super::Shared;
use crate::service::Voiceprint;
use crate::transport::ReqwestTransport;

/// Voiceprint client for async runtimes.
///
/// Clones share credentials: a login on one is seen by all.
///
/// # Example
///
/// ```no_run
/// use voiceprint_core::{ClientConfig, OnHttpError, VoiceprintClient};
/// use voiceprint_http::AsyncClient;
///
/// # async fn run() -> voiceprint_core::Result<()> {
/// let client = AsyncClient::new(&ClientConfig::new("vp_key").auto_refresh(true))?;
/// client.login(OnHttpError::Raise).await?;
/// let files = client.voiceprint().files(None, Default::default()).await?;
/// println!("{}", files);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AsyncClient<T = ReqwestTransport> {
    shared: Arc<Shared>,
    transport: T,
}

impl AsyncClient<ReqwestTransport> {
    /// Build a client over reqwest.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.resolve()?;
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> AsyncClient<T> {
    /// Build a client over any transport.
    pub fn with_transport(config: ResolvedConfig, transport: T) -> Self {
        Self {
            shared: Arc::new(Shared::new(config)),
            transport,
        }
    }

    /// File listing and upload calls.
    pub fn voiceprint(&self) -> Voiceprint<'_, Self> {
        Voiceprint::new(self)
    }

    async fn recover(&self) -> bool {
        if self.try_refresh_session().await {
            return true;
        }
        self.try_relogin().await
    }
}

#[async_trait]
impl<T: Transport> VoiceprintClient for AsyncClient<T> {
    fn base_url(&self) -> &BaseUrl {
        &self.shared.config.base_url
    }

    fn credentials(&self) -> CredentialState {
        self.shared.snapshot()
    }

    #[instrument(skip(self, call), fields(method = call.method.as_str(), url = %call.url))]
    async fn send(&self, call: LogicalCall) -> Result<Option<Value>> {
        let mut pipeline = self.shared.pipeline(call);
        let mut step = Step::Send;
        loop {
            step = match step {
                Step::Send => {
                    let request = self.shared.read(|state| pipeline.next_request(state));
                    let response = self.transport.execute(request).await?;
                    self.shared
                        .write(|state| pipeline.on_response(response, state))?
                }
                Step::Recover => {
                    let recovered = self.recover().await;
                    pipeline.on_recovery(recovered)?
                }
                Step::Done(value) => return Ok(value),
            };
        }
    }

    #[instrument(skip(self))]
    async fn login(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>> {
        info!("Logging in");
        let value = self.send(self.shared.login_call(on_error)).await?;
        Ok(value.map(|v| self.shared.apply_auth(v)))
    }

    #[instrument(skip(self))]
    async fn refresh(&self, on_error: OnHttpError) -> Result<Option<AuthResponse>> {
        debug!("Refreshing tokens");
        let call = self.shared.refresh_call(on_error)?;
        let value = self.send(call).await?;
        Ok(value.map(|v| self.shared.apply_auth(v)))
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<Option<Value>> {
        match self.send(self.shared.logout_call()).await? {
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

    async fn try_refresh_session(&self) -> bool {
        let request = self.shared.refresh_request();
        let outcome = self.transport.execute(request).await;
        let refreshed = self.shared.write(|state| recovery::absorb(outcome, state));
        if refreshed {
            debug!("Session refreshed");
        }
        refreshed
    }

    async fn try_relogin(&self) -> bool {
        let request = self.shared.login_request();
        let outcome = self.transport.execute(request).await;
        let relogged = self.shared.write(|state| recovery::absorb(outcome, state));
        if relogged {
            debug!("Logged in again");
        }
        relogged
    }
}

impl<T> std::fmt::Debug for AsyncClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncClient")
            .field("base_url", &self.shared.config.base_url.as_str())
            .field("auto_refresh", &self.shared.config.auto_refresh)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
