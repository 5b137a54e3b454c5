use crate::utils::config::Config;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;

/// An image payload lifted out of a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// External media host. Only the resulting public URL is persisted; the
/// binary never touches the database.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload_image(&self, image: ImageUpload) -> AppResult<String>;
}

/// Media host client speaking the common "multipart upload, JSON answer with
/// a secure_url" protocol.
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl HttpMediaStore {
    pub fn new(config: &Config) -> Self {
        HttpMediaStore {
            client: reqwest::Client::new(),
            upload_url: config.media_upload_url.clone(),
            api_key: config.media_api_key.clone(),
            folder: config.media_folder.clone(),
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload_image(&self, image: ImageUpload) -> AppResult<String> {
        let mut part = reqwest::multipart::Part::bytes(image.bytes).file_name("upload");
        if let Some(content_type) = image.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| AppError::UploadError(e.to_string()))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", self.folder.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::UploadError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::UploadError(format!(
                "media host responded with {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::UploadError(e.to_string()))?;

        Ok(body.secure_url)
    }
}
