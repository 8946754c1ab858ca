//! HTTP client for the media upload host.

use bytes::Bytes;
use serde::Deserialize;

use super::{MediaError, MediaStore, UploadedMedia};

/// Response body of the host's upload endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: String,
    public_id: String,
}

/// Media host client speaking the host's REST upload API.
///
/// `POST {base}/upload` with a multipart body (`file`, `folder`) returns the
/// public URL and deletion token; `DELETE {base}/media/{publicId}` removes
/// previously stored content.
pub struct HttpMediaStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpMediaStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, bytes: Bytes, folder: &str) -> Result<UploadedMedia, MediaError> {
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes.to_vec()).file_name("upload"),
            )
            .text("folder", folder.to_string());

        let response = self
            .authorize(self.client.post(format!("{}/upload", self.base_url)))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::BadResponse(e.to_string()))?;

        Ok(UploadedMedia {
            url: uploaded.url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let response = self
            .authorize(
                self.client
                    .delete(format!("{}/media/{}", self.base_url, public_id)),
            )
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
