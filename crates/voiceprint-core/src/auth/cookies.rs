//! Session cookie jar.

use std::collections::BTreeMap;

/// Cookies issued by the server and replayed on the next request.
///
/// The jar is opaque to the client: it only carries server-side session
/// affinity. After each successful pipeline request the whole jar is
/// replaced by the cookies of that response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    cookies: BTreeMap<String, String>,
}

impl SessionCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a cookie.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the jar as a `Cookie` request header value.
    ///
    /// Returns `None` for an empty jar so no header is sent.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        Some(pairs.join("; "))
    }
}

impl<K, V> FromIterator<(K, V)> for SessionCookies
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = SessionCookies::new();
        for (name, value) in iter {
            jar.insert(name, value);
        }
        jar
    }
}
