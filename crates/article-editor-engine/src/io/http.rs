use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use super::{Backend, BackendError};
use crate::models::{ApiStatus, Document, ErrorBody, LoadResponse, SaveResponse, UploadResponse};
use crate::upload::ImageFile;

/// [`Backend`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// `base_url` is where the endpoints live, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BackendError> {
        // Url::join replaces the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|source| BackendError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|source| BackendError::InvalidUrl {
                url: format!("{}{path}", self.base),
                source,
            })
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

fn application_error(message: Option<String>) -> BackendError {
    BackendError::Application(message.unwrap_or_else(|| "unknown error".to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn load(&self) -> Result<Document, BackendError> {
        let response = self.client.get(self.endpoint("load")?).send().await?;
        let payload: LoadResponse = read_json(response).await?;

        match payload.status {
            ApiStatus::Success => Ok(payload.into_document()),
            ApiStatus::Error => Err(application_error(payload.message)),
        }
    }

    async fn save(&self, document: &Document) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.endpoint("save")?)
            .json(document)
            .send()
            .await?;
        let payload: SaveResponse = read_json(response).await?;

        match payload.status {
            ApiStatus::Success => Ok(()),
            ApiStatus::Error => Err(application_error(payload.message)),
        }
    }

    async fn upload_image(&self, file: &ImageFile) -> Result<String, BackendError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(self.endpoint("upload-image")?)
            .multipart(form)
            .send()
            .await?;
        let payload: UploadResponse = read_json(response).await?;

        match payload.status {
            ApiStatus::Success => payload.file_path.ok_or(BackendError::MissingFilePath),
            ApiStatus::Error => Err(application_error(payload.message)),
        }
    }
}
