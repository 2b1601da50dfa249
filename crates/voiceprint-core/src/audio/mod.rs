//! Structural checks for uploaded audio.
//!
//! The service only accepts stereo 48 kHz audio: 16-bit linear PCM in WAV
//! containers, or MP3 at 192 kbps and up. Files are checked here before any
//! bytes leave the machine.

mod mp3;
mod wav;

use std::path::Path;

use crate::error::{AudioFormatError, UploadError};

pub use mp3::Mp3Info;

/// Required channel count for every accepted format.
pub const REQUIRED_CHANNELS: u16 = 2;

/// Required sample rate for every accepted format.
pub const REQUIRED_SAMPLE_RATE: u32 = 48_000;

/// Minimum MP3 bitrate in kbps.
pub const MIN_MP3_KBPS: u32 = 192;

/// Note attached to accepted variable-bitrate MP3 files.
pub const VBR_NOTE: &str = "VBR accepted, CBR recommended";

/// Accepted audio container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    Wav,
    Mp3,
}

impl AudioKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "wav" => Ok(AudioKind::Wav),
            "mp3" => Ok(AudioKind::Mp3),
            _ => Err(UploadError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{}", extension)
                },
            }),
        }
    }

    /// Check file contents against the service's requirements.
    ///
    /// Returns an optional note for files that pass with a caveat.
    pub fn validate(self, bytes: &[u8]) -> Result<Option<&'static str>, AudioFormatError> {
        match self {
            AudioKind::Wav => wav::validate(bytes).map(|()| None),
            AudioKind::Mp3 => mp3::validate(bytes),
        }
    }
}
