//! Upload preparation.
//!
//! Everything the service would reject is caught here, before any network
//! traffic: the extension, then the size on disk, then the audio format.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::audio::AudioKind;
use crate::error::UploadError;
use crate::transport::MultipartForm;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A validated audio file ready to be sent.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub kind: AudioKind,
    /// Caveat from validation, e.g. for VBR MP3 files.
    pub note: Option<&'static str>,
    bytes: Vec<u8>,
}

impl UploadFile {
    /// Check and load a file.
    ///
    /// `file_name` overrides the name sent to the server; it defaults to the
    /// path's base name.
    pub fn prepare(path: &Path, file_name: Option<&str>) -> Result<Self, UploadError> {
        let kind = AudioKind::from_path(path)?;

        let io_error = |source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let bytes = fs::read(path).map_err(io_error)?;
        let note = kind.validate(&bytes)?;

        let file_name = match file_name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("audio")
                .to_string(),
        };
        let mime = mime_type_for(&file_name);

        debug!(file = %file_name, size, mime = %mime, "Prepared upload");

        Ok(Self {
            file_name,
            mime,
            kind,
            note,
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Build the `/upload` form: a `file` part and a `target_name` field.
    pub fn into_form(self, target_name: &str) -> MultipartForm {
        MultipartForm::new()
            .file("file", self.file_name, self.bytes, self.mime)
            .text("target_name", target_name)
    }
}

/// MIME type guessed from a file name.
pub fn mime_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
