use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::error::{ErrorMessage, HttpError};

/// REST client for the object store holding the property images bucket.
/// All server-side calls authenticate with the privileged service key;
/// browsers never see it — they get short-lived signed upload paths.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    service_key: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl From<StorageError> for HttpError {
    fn from(error: StorageError) -> Self {
        tracing::error!("storage error: {}", error);
        HttpError::server_error(ErrorMessage::ServerError)
    }
}

/// Everything the browser needs to push bytes straight into the bucket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub path: String,
    pub token: Option<String>,
    pub upload_url: String,
    pub public_url: String,
}

#[derive(Debug, Deserialize)]
struct SignUploadResponse {
    url: String,
}

pub struct UploadItem {
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StorageClient {
    pub fn new(config: &Config) -> Self {
        StorageClient {
            http: reqwest::Client::new(),
            base_url: config.storage_url.trim_end_matches('/').to_string(),
            bucket: config.storage_bucket.clone(),
            service_key: config.storage_service_key.clone(),
        }
    }

    fn encoded_path(path: &str) -> String {
        path.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            Self::encoded_path(path)
        )
    }

    /// Public read URL of an object in the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            Self::encoded_path(path)
        )
    }

    /// Inverse of [`Self::public_url`], for recovering the object path of
    /// an image URL stored on a property. Foreign URLs return None.
    pub fn object_path_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!(
            "{}/storage/v1/object/public/{}/",
            self.base_url, self.bucket
        );
        let encoded = url.strip_prefix(&prefix)?;
        if encoded.is_empty() {
            return None;
        }
        match urlencoding::decode(encoded) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(_) => None,
        }
    }

    /// Server-side write through the privileged credential. Returns the
    /// public URL of the stored object.
    pub async fn upload_object(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let response = self
            .http
            .post(self.object_url(path))
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(self.public_url(path))
    }

    /// Issue a short-lived, path-scoped upload permission so the browser
    /// can push the bytes itself.
    pub async fn create_signed_upload(&self, path: &str) -> Result<SignedUpload, StorageError> {
        let sign_url = format!(
            "{}/storage/v1/object/upload/sign/{}/{}",
            self.base_url,
            self.bucket,
            Self::encoded_path(path)
        );

        let response = self
            .http
            .post(&sign_url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let signed: SignUploadResponse = response.json().await?;

        Ok(SignedUpload {
            path: path.to_string(),
            token: extract_token(&signed.url),
            upload_url: format!("{}/storage/v1{}", self.base_url, signed.url),
            public_url: self.public_url(path),
        })
    }

    /// Remove objects, typically after their property was deleted.
    pub async fn delete_objects(&self, paths: &[String]) -> Result<(), StorageError> {
        if paths.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .delete(format!("{}/storage/v1/object/{}", self.base_url, self.bucket))
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Upload several images independently: every item gets its own
    /// outcome and one failure never aborts the rest of the batch.
    pub async fn upload_many(
        &self,
        items: Vec<UploadItem>,
    ) -> Vec<Result<String, StorageError>> {
        let uploads = items.into_iter().map(|item| async move {
            self.upload_object(&item.path, &item.content_type, item.bytes)
                .await
        });

        join_all(uploads).await
    }
}

/// Pull the scoped token out of a signed upload URL
/// (`/object/upload/sign/bucket/path?token=...`).
fn extract_token(signed_url: &str) -> Option<String> {
    let (_, query) = signed_url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|t| !t.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> StorageClient {
        StorageClient {
            http: reqwest::Client::new(),
            base_url: "https://abc.supabase.co".to_string(),
            bucket: "property_images".to_string(),
            service_key: "service-key".to_string(),
        }
    }

    #[test]
    fn test_public_url() {
        let client = test_client();
        assert_eq!(
            client.public_url("property-1700000000000-a1b2c3d4.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/property_images/property-1700000000000-a1b2c3d4.jpg"
        );
    }

    #[test]
    fn test_object_path_roundtrip() {
        let client = test_client();
        let path = "property-1700000000000-a1b2c3d4.jpg";
        let url = client.public_url(path);
        assert_eq!(client.object_path_from_url(&url).as_deref(), Some(path));
    }

    #[test]
    fn test_foreign_urls_yield_no_path() {
        let client = test_client();
        assert_eq!(
            client.object_path_from_url("https://elsewhere.example.com/img.jpg"),
            None
        );
        assert_eq!(
            client.object_path_from_url("https://abc.supabase.co/storage/v1/object/public/other_bucket/x.jpg"),
            None
        );
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_token("/object/upload/sign/property_images/a.jpg?token=eyJhbGc"),
            Some("eyJhbGc".to_string())
        );
        assert_eq!(
            extract_token("/object/upload/sign/property_images/a.jpg?x=1&token=t2&y=2"),
            Some("t2".to_string())
        );
        assert_eq!(extract_token("/object/upload/sign/property_images/a.jpg"), None);
        assert_eq!(extract_token("/path?token="), None);
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let client = test_client();
        assert_eq!(
            client.public_url("folder/has space.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/property_images/folder/has%20space.jpg"
        );
    }
}
