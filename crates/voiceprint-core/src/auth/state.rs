//! Per-client credential state.

use crate::endpoints::AuthResponse;

use super::{AccessToken, ApiKey, RefreshToken, SessionCookies};

/// Everything a client knows about its authentication.
///
/// Created holding only the API key. Mutated exclusively through the
/// methods below: auth responses, logout and successful requests.
#[derive(Debug, Clone)]
pub struct CredentialState {
    api_key: ApiKey,
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    cookies: SessionCookies,
}

impl CredentialState {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            access_token: None,
            refresh_token: None,
            cookies: SessionCookies::new(),
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// Take whichever tokens the response carries; absent ones are kept.
    pub fn apply_auth_response(&mut self, response: &AuthResponse) {
        if let Some(token) = &response.token {
            self.access_token = Some(AccessToken::new(token.clone()));
        }
        if let Some(refresh) = &response.refresh_token {
            self.refresh_token = Some(RefreshToken::new(refresh.clone()));
        }
    }

    /// Replace both tokens if, and only if, the response carries both.
    pub fn accept_complete(&mut self, response: &AuthResponse) -> bool {
        if !response.is_complete() {
            return false;
        }
        self.apply_auth_response(response);
        true
    }

    /// Drop both tokens. Cookies are left alone.
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }

    pub fn replace_cookies(&mut self, cookies: SessionCookies) {
        self.cookies = cookies;
    }
}
