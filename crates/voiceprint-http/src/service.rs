//! File listing and upload.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, instrument};

use voiceprint_core::endpoints;
use voiceprint_core::error::UploadError;
use voiceprint_core::transport::RequestBody;
use voiceprint_core::{
    BlockingVoiceprintClient, FilesMode, OnHttpError, Result, UploadFile, VoiceprintClient,
};

fn files_params(target_name: Option<&str>, mode: FilesMode) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(2);
    if let Some(target) = target_name {
        params.push(("target_name".to_string(), target.to_string()));
    }
    params.push(("mode".to_string(), mode.as_str().to_string()));
    params
}

fn upload_body(file: UploadFile, target_name: &str) -> RequestBody {
    info!(
        file = %file.file_name,
        size = file.len(),
        target = target_name,
        "Uploading audio"
    );
    RequestBody::Multipart(file.into_form(target_name))
}

/// Voiceprint calls over an [`AsyncClient`](crate::AsyncClient).
#[derive(Debug)]
pub struct Voiceprint<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: VoiceprintClient + ?Sized> Voiceprint<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// List uploaded files, optionally for one target.
    #[instrument(skip(self))]
    pub async fn files(&self, target_name: Option<&str>, mode: FilesMode) -> Result<Value> {
        let body = self
            .client
            .get(
                endpoints::FILES,
                files_params(target_name, mode),
                OnHttpError::Raise,
            )
            .await?;
        Ok(body.unwrap_or(Value::Null))
    }

    /// Validate and upload an audio file.
    ///
    /// Nothing is sent unless the file passes every local check.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload(
        &self,
        target_name: &str,
        path: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<Value> {
        let path = path.as_ref().to_path_buf();
        let file = prepare_off_thread(path, filename.map(str::to_string)).await?;
        let body = self
            .client
            .post(
                endpoints::UPLOAD,
                upload_body(file, target_name),
                OnHttpError::Raise,
            )
            .await?;
        Ok(body.unwrap_or(Value::Null))
    }
}

async fn prepare_off_thread(path: PathBuf, filename: Option<String>) -> Result<UploadFile> {
    let task_path = path.clone();
    let file = tokio::task::spawn_blocking(move || {
        UploadFile::prepare(&task_path, filename.as_deref())
    })
    .await
    .map_err(|e| UploadError::Io {
        path,
        source: io::Error::other(e),
    })??;
    Ok(file)
}

/// Voiceprint calls over a [`BlockingClient`](crate::BlockingClient).
#[derive(Debug)]
pub struct BlockingVoiceprint<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: BlockingVoiceprintClient + ?Sized> BlockingVoiceprint<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub fn files(&self, target_name: Option<&str>, mode: FilesMode) -> Result<Value> {
        let body = self.client.get(
            endpoints::FILES,
            files_params(target_name, mode),
            OnHttpError::Raise,
        )?;
        Ok(body.unwrap_or(Value::Null))
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn upload(
        &self,
        target_name: &str,
        path: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<Value> {
        let file = UploadFile::prepare(path.as_ref(), filename)?;
        let body = self.client.post(
            endpoints::UPLOAD,
            upload_body(file, target_name),
            OnHttpError::Raise,
        )?;
        Ok(body.unwrap_or(Value::Null))
    }
}
