//! voiceprint-core - Core types, credential state and request pipeline for
//! the voiceprint API client.
//!
//! This crate holds everything that does not perform I/O: the credential
//! state, the error taxonomy, configuration, the transport contract, the
//! request pipeline state machine and upload validation. The
//! `voiceprint-http` crate drives these over real HTTP.

pub mod audio;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod pipeline;
pub mod transport;
pub mod types;
pub mod upload;

pub use auth::{AccessToken, ApiKey, CredentialState, RefreshToken, SessionCookies};
pub use client::{BlockingVoiceprintClient, VoiceprintClient};
pub use config::{ClientConfig, ExecutionMode, LogoutPolicy, OnHttpError, ResolvedConfig};
pub use endpoints::AuthResponse;
pub use error::Error;
pub use pipeline::{LogicalCall, PipelineState, RequestPipeline, Step};
pub use transport::{BlockingTransport, HttpRequest, HttpResponse, Method, Transport};
pub use types::{BaseUrl, DEFAULT_BASE_URL, FilesMode};
pub use upload::UploadFile;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
