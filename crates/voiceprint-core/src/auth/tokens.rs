//! Token types issued by login and refresh.

use std::fmt;

macro_rules! secret_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// Returns the raw token.
            ///
            /// # Security
            ///
            /// Use only when building requests or exporting state.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }
    };
}

secret_token!(
    /// Short-lived token returned as `token` by `/login` and `/refresh`.
    ///
    /// Held for callers; requests keep authenticating with the API key.
    AccessToken
);

secret_token!(
    /// Longer-lived token returned as `refresh_token`, sent to `/refresh`.
    RefreshToken
);
