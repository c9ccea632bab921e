//! Object storage client for the Folio portfolio backend
//!
//! Each feature area (blog covers, product shots, photo gallery, resume
//! assets) uses its own named bucket. Uploads take a path and raw bytes and
//! the public URL of a stored object is derived deterministically from
//! bucket + path, so callers can persist it into a record right after the
//! upload resolves.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Upload options forwarded to the storage service.
#[derive(Debug, Clone, Serialize, Default)]
pub struct FileOptions {
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
    pub upsert: Option<bool>,
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_control(mut self, cache_control: &str) -> Self {
        self.cache_control = Some(cache_control.to_string());
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = Some(upsert);
        self
    }
}

/// Listing options for a bucket prefix.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ListOptions {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    pub search: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }
}

/// One stored object as returned by a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Acknowledgement returned by an upload.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    #[serde(alias = "Key")]
    pub key: String,
}

/// Client for the object storage service.
pub struct StorageClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

/// Client scoped to one bucket.
pub struct BucketClient<'a> {
    parent: &'a StorageClient,
    bucket_id: String,
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// Scope to a named bucket.
    pub fn from<'a>(&'a self, bucket_id: &str) -> BucketClient<'a> {
        BucketClient {
            parent: self,
            bucket_id: bucket_id.to_string(),
        }
    }
}

impl<'a> BucketClient<'a> {
    /// Upload raw bytes to `path` within the bucket.
    pub async fn upload(
        &self,
        path: &str,
        data: Bytes,
        options: Option<FileOptions>,
    ) -> Result<StoredObject> {
        let mut url = Url::parse(&self.parent.base_url)?;
        url.set_path(&format!("/storage/v1/object/{}/{}", self.bucket_id, path));

        if let Some(opts) = &options {
            let mut query_pairs = url.query_pairs_mut();
            if let Some(cache_control) = &opts.cache_control {
                query_pairs.append_pair("cache_control", cache_control);
            }
            if let Some(upsert) = &opts.upsert {
                query_pairs.append_pair("upsert", &upsert.to_string());
            }
        }

        let file_name = path
            .rsplit('/')
            .next()
            .unwrap_or(path)
            .to_string();

        let mut part = Part::bytes(data.to_vec()).file_name(file_name);
        if let Some(content_type) = options.as_ref().and_then(|o| o.content_type.clone()) {
            part = part
                .mime_str(&content_type)
                .map_err(|e| StorageError::ApiError(format!("Invalid content type: {}", e)))?;
        }

        let form = Form::new().part("file", part);

        let response = self
            .parent
            .http_client
            .post(url)
            .header("apikey", &self.parent.api_key)
            .header("Authorization", format!("Bearer {}", &self.parent.api_key))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            log::warn!("upload to {}/{} failed: {}", self.bucket_id, path, error_text);
            return Err(StorageError::ApiError(error_text));
        }

        response
            .json::<StoredObject>()
            .await
            .map_err(|e| StorageError::DeserializationError(e.to_string()))
    }

    /// Download an object's bytes.
    pub async fn download(&self, path: &str) -> Result<Bytes> {
        let mut url = Url::parse(&self.parent.base_url)?;
        url.set_path(&format!("/storage/v1/object/{}/{}", self.bucket_id, path));

        let response = self
            .parent
            .http_client
            .get(url)
            .header("apikey", &self.parent.api_key)
            .header("Authorization", format!("Bearer {}", &self.parent.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(StorageError::ApiError(error_text));
        }

        Ok(response.bytes().await?)
    }

    /// List objects under a prefix.
    pub async fn list(&self, prefix: &str, options: Option<ListOptions>) -> Result<Vec<ObjectInfo>> {
        let mut url = Url::parse(&self.parent.base_url)?;
        url.set_path(&format!("/storage/v1/object/list/{}", self.bucket_id));

        {
            let mut query_pairs = url.query_pairs_mut();
            query_pairs.append_pair("prefix", prefix);

            if let Some(opts) = &options {
                if let Some(limit) = opts.limit {
                    query_pairs.append_pair("limit", &limit.to_string());
                }
                if let Some(offset) = opts.offset {
                    query_pairs.append_pair("offset", &offset.to_string());
                }
                if let Some(search) = &opts.search {
                    query_pairs.append_pair("search", search);
                }
            }
        }

        let response = self
            .parent
            .http_client
            .get(url)
            .header("apikey", &self.parent.api_key)
            .header("Authorization", format!("Bearer {}", &self.parent.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(StorageError::ApiError(error_text));
        }

        response
            .json::<Vec<ObjectInfo>>()
            .await
            .map_err(|e| StorageError::DeserializationError(e.to_string()))
    }

    /// Remove the given paths from the bucket.
    pub async fn remove(&self, paths: Vec<&str>) -> Result<()> {
        let url = format!(
            "{}/storage/v1/object/{}",
            self.parent.base_url, self.bucket_id
        );

        let payload = serde_json::json!({ "prefixes": paths });

        let response = self
            .parent
            .http_client
            .delete(&url)
            .header("apikey", &self.parent.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(StorageError::ApiError(error_text));
        }

        Ok(())
    }

    /// Deterministic public URL for an object in a public bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.parent.base_url, self.bucket_id, path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_upload_returns_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/storage/v1/object/photos/2024/shot.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Key": "photos/2024/shot.jpg"
            })))
            .mount(&mock_server)
            .await;

        let storage = StorageClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

        let result = storage
            .from("photos")
            .upload(
                "2024/shot.jpg",
                Bytes::from_static(b"jpegdata"),
                Some(FileOptions::new().with_content_type("image/jpeg")),
            )
            .await;

        assert!(result.is_ok(), "upload failed: {:?}", result.err());
        assert_eq!(result.unwrap().key, "photos/2024/shot.jpg");
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/storage/v1/object/photos/big.png"))
            .respond_with(
                ResponseTemplate::new(413).set_body_string("Payload too large"),
            )
            .mount(&mock_server)
            .await;

        let storage = StorageClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

        let result = storage
            .from("photos")
            .upload("big.png", Bytes::from_static(b"..."), None)
            .await;

        match result {
            Err(StorageError::ApiError(message)) => assert_eq!(message, "Payload too large"),
            other => panic!("expected ApiError, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_list_with_prefix() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/storage/v1/object/list/blog-covers"))
            .and(query_param("prefix", "2024/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "2024/cover-a.png" },
                { "name": "2024/cover-b.png" }
            ])))
            .mount(&mock_server)
            .await;

        let storage = StorageClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

        let result = storage.from("blog-covers").list("2024/", None).await;

        assert!(result.is_ok(), "list failed: {:?}", result.err());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/storage/v1/object/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let storage = StorageClient::new(&mock_server.uri(), "fake-key", reqwest::Client::new());

        let result = storage.from("photos").remove(vec!["2024/shot.jpg"]).await;

        assert!(result.is_ok(), "remove failed: {:?}", result.err());
    }

    #[test]
    fn test_public_url_is_deterministic() {
        let storage = StorageClient::new(
            "https://folio.example.com",
            "fake-key",
            reqwest::Client::new(),
        );

        assert_eq!(
            storage.from("photos").public_url("2024/shot.jpg"),
            "https://folio.example.com/storage/v1/object/public/photos/2024/shot.jpg"
        );
    }
}
