//! Validated value types for the voiceprint API.

mod base_url;
mod files_mode;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use files_mode::FilesMode;
