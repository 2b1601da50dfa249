//! voiceprint-http - Blocking and async clients for the voiceprint API.
//!
//! Both clients run the shared request pipeline from `voiceprint-core` over
//! reqwest: a 403 triggers one refresh-then-login recovery and one retry
//! when auto-refresh is on.
//!
//! ```no_run
//! use voiceprint_core::{BlockingVoiceprintClient, ClientConfig, FilesMode, OnHttpError};
//! use voiceprint_http::BlockingClient;
//!
//! # fn main() -> voiceprint_core::Result<()> {
//! let client = BlockingClient::new(&ClientConfig::new("vp_key").auto_refresh(true))?;
//! client.login(OnHttpError::Raise)?;
//! let files = client.voiceprint().files(Some("alice"), FilesMode::List)?;
//! println!("{}", files);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod service;
pub mod transport;

pub use client::{ApiClient, AsyncClient, BlockingClient};
pub use service::{BlockingVoiceprint, Voiceprint};
pub use transport::{BlockingReqwestTransport, ReqwestTransport, USER_AGENT};
