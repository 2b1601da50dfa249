//! Credential state and authentication exchanges.
//!
//! [`CredentialState`] is the only place tokens and cookies live. The
//! [`recovery`] helpers build and judge the single-shot refresh and login
//! exchanges the request pipeline falls back on after a 403.

mod api_key;
mod cookies;
mod state;
mod tokens;

pub mod recovery;

pub use api_key::ApiKey;
pub use cookies::SessionCookies;
pub use state::CredentialState;
pub use tokens::{AccessToken, RefreshToken};
