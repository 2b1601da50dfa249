//! Error types for the voiceprint client.
//!
//! A single [`Error`] enum with explicit variants for transport, HTTP,
//! authentication, upload and input validation failures. Recovery helpers
//! never produce these; only the pipeline's terminal states and the
//! operations built on it do.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for voiceprint operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout). Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A non-200 response the pipeline did not recover from.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// Authentication errors (expired session, banned account, logout).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Upload rejected on the client before anything was sent.
    #[error("upload rejected: {0}")]
    Upload(#[from] UploadError),

    /// Input validation errors (base URL, API key).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A 200 response whose body is not JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the re-authentication protocol was exhausted.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Error::Auth(AuthError::TokenExpired))
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The request could not be built or sent.
    #[error("request failed: {message}")]
    Request { message: String },
}

/// A non-200 HTTP response surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body text.
    pub body: String,
}

impl HttpError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API HTTP error: {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, " {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token expired or invalid and recovery (refresh, then login) failed,
    /// or the retried call was rejected again.
    #[error("token expired or invalid")]
    TokenExpired,

    /// The server refused the account outright. Not retryable.
    #[error("account banned: {reason}")]
    AccountBanned { reason: String },

    /// The logout request did not succeed.
    #[error("logout failed")]
    LogoutFailed,
}

/// Client-side upload rejections.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Only `.wav` and `.mp3` files are accepted.
    #[error("unsupported format '{extension}': only .wav and .mp3 are accepted")]
    UnsupportedFormat { extension: String },

    /// File exceeds the upload size cap.
    #[error("file is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    /// File failed the structural audio check.
    #[error("{0}")]
    InvalidAudio(#[from] AudioFormatError),

    /// File could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons an audio file fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioFormatError {
    #[error("{codec}: expected 2 channels (stereo), found {found}")]
    Channels { codec: &'static str, found: u16 },

    #[error("WAV: expected 16-bit samples, found {found}-bit")]
    SampleWidth { found: u16 },

    #[error("{codec}: expected a 48000 Hz sample rate, found {found} Hz")]
    SampleRate { codec: &'static str, found: u32 },

    #[error("WAV: only uncompressed linear PCM is supported")]
    Compressed,

    #[error("MP3: bitrate below 192 kbps ({found} kbps)")]
    Bitrate { found: u32 },

    #[error("{codec}: malformed or corrupt file: {reason}")]
    Malformed { codec: &'static str, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// API key unusable as a header value.
    #[error("invalid API key: {reason}")]
    ApiKey { reason: String },

    /// Unknown listing mode.
    #[error("invalid files mode '{value}': expected 'dict' or 'list'")]
    FilesMode { value: String },
}
