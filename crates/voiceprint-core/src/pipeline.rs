//! The request pipeline: one logical call, at most two physical attempts.
//!
//! [`RequestPipeline`] is a sans-I/O state machine. A driver (the blocking or
//! the async client) asks it for the next request, executes that request on
//! its own transport, feeds the response back, and performs recovery when
//! told to. Both execution modes therefore share one implementation of the
//! 403 protocol:
//!
//! ```text
//! Initial -> AwaitingResponse -> Success
//!                             -> Failed
//!                             -> NeedsRecovery -> AwaitingResponse (once)
//!                                              -> Failed
//! ```
//!
//! A second 403 after a successful recovery is never recoverable, and a
//! recovered call to the refresh endpoint itself stops instead of retrying.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::auth::CredentialState;
use crate::config::OnHttpError;
use crate::endpoints;
use crate::error::{AuthError, HttpError};
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody};

const STATUS_OK: u16 = 200;
const STATUS_FORBIDDEN: u16 = 403;

/// A caller-initiated request/response exchange.
#[derive(Debug, Clone)]
pub struct LogicalCall {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
    pub on_error: OnHttpError,
}

impl LogicalCall {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: RequestBody::Empty,
            on_error: OnHttpError::Raise,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn on_error(mut self, on_error: OnHttpError) -> Self {
        self.on_error = on_error;
        self
    }
}

/// Where a pipeline is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Initial,
    AwaitingResponse,
    NeedsRecovery,
    Success,
    Failed,
}

/// What the driver must do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Build the next request with [`RequestPipeline::next_request`] and send it.
    Send,
    /// Run refresh-then-login recovery and report via [`RequestPipeline::on_recovery`].
    Recover,
    /// The logical call is over.
    Done(Option<Value>),
}

/// State machine for one logical call.
#[derive(Debug)]
pub struct RequestPipeline {
    call: LogicalCall,
    auto_refresh: bool,
    timeout: Duration,
    targets_refresh: bool,
    state: PipelineState,
    retried: bool,
    attempts: u8,
}

impl RequestPipeline {
    /// Start a pipeline.
    ///
    /// `refresh_url` is the client's refresh endpoint; a call to it is never
    /// retried after recovery.
    pub fn new(
        call: LogicalCall,
        auto_refresh: bool,
        timeout: Duration,
        refresh_url: &str,
    ) -> Self {
        let targets_refresh = call.url == refresh_url;
        Self {
            call,
            auto_refresh,
            timeout,
            targets_refresh,
            state: PipelineState::Initial,
            retried: false,
            attempts: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Physical attempts issued so far.
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn call(&self) -> &LogicalCall {
        &self.call
    }

    /// Build the next physical request from the current credentials.
    pub fn next_request(&mut self, credentials: &CredentialState) -> HttpRequest {
        self.state = PipelineState::AwaitingResponse;
        self.attempts += 1;
        debug!(
            method = self.call.method.as_str(),
            url = %self.call.url,
            attempt = self.attempts,
            "Sending request"
        );

        HttpRequest {
            method: self.call.method,
            url: self.call.url.clone(),
            headers: vec![(
                "Authorization".to_string(),
                credentials.api_key().authorization(),
            )],
            params: self.call.params.clone(),
            body: self.call.body.clone(),
            cookies: credentials.cookies().clone(),
            timeout: self.timeout,
        }
    }

    /// Feed back the response to the last request.
    ///
    /// On 200 the credential state's cookie jar is replaced by the
    /// response's cookies.
    pub fn on_response(
        &mut self,
        response: HttpResponse,
        credentials: &mut CredentialState,
    ) -> Result<Step> {
        debug!(status = response.status, url = %self.call.url, "Received response");

        match response.status {
            STATUS_OK => {
                let body = response.json();
                credentials.replace_cookies(response.cookies);
                match body {
                    Ok(value) => {
                        self.state = PipelineState::Success;
                        Ok(Step::Done(Some(value)))
                    }
                    Err(err) => {
                        self.state = PipelineState::Failed;
                        Err(err.into())
                    }
                }
            }
            STATUS_FORBIDDEN => self.on_forbidden(response),
            _ => self.fail(response),
        }
    }

    fn on_forbidden(&mut self, response: HttpResponse) -> Result<Step> {
        if let Some(reason) = endpoints::banned_reason(&response.body) {
            warn!(url = %self.call.url, "Account banned");
            self.state = PipelineState::Failed;
            return Err(AuthError::AccountBanned { reason }.into());
        }

        if !self.auto_refresh {
            return self.fail(response);
        }

        if self.retried {
            warn!(url = %self.call.url, "Rejected again after re-authentication");
            self.state = PipelineState::Failed;
            return Err(AuthError::TokenExpired.into());
        }

        warn!(url = %self.call.url, "Authorization rejected, recovering session");
        self.state = PipelineState::NeedsRecovery;
        Ok(Step::Recover)
    }

    /// Report whether refresh-then-login recovery succeeded.
    pub fn on_recovery(&mut self, recovered: bool) -> Result<Step> {
        debug_assert_eq!(self.state, PipelineState::NeedsRecovery);

        if !recovered {
            warn!("Session recovery failed");
            self.state = PipelineState::Failed;
            return Err(AuthError::TokenExpired.into());
        }

        if self.targets_refresh {
            debug!("Recovered during a refresh call, not retrying it");
            self.state = PipelineState::Success;
            return Ok(Step::Done(None));
        }

        self.retried = true;
        Ok(Step::Send)
    }

    fn fail(&mut self, response: HttpResponse) -> Result<Step> {
        self.state = PipelineState::Failed;
        match self.call.on_error {
            OnHttpError::ReturnNone => Ok(Step::Done(None)),
            OnHttpError::Raise => Err(HttpError::new(response.status, response.body).into()),
        }
    }
}
