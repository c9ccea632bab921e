//! Hosted function invocations for the Folio portfolio backend
//!
//! Two features delegate real work to opaque external endpoints: the SEO
//! analyzer asks a completion model for on-page recommendations, and the
//! background remover sends an image to a segmentation model and gets a
//! cutout back. Both go through the generic `invoke` below; the typed
//! wrappers pin down the only structured contracts we rely on.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FunctionsError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Function error: {0}")]
    FunctionError(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, FunctionsError>;

/// Extra headers for one invocation.
#[derive(Default)]
pub struct FunctionOptions {
    pub headers: Option<std::collections::HashMap<String, String>>,
}

/// Priority assigned to a recommendation by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One entry of the SEO recommendation contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoRecommendation {
    pub priority: Priority,
    pub category: String,
    pub recommendation: String,
    pub impact: String,
}

/// Coarse on-page analysis shipped alongside the URL and keyword.
///
/// This is deliberately shallow; the model does the actual reasoning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub word_count: u32,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: u32,
    pub images_missing_alt: u32,
    pub keyword_occurrences: u32,
}

/// RGBA cutout returned by the segmentation model.
#[derive(Debug, Clone)]
pub struct Cutout {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel.
    pub rgba: Vec<u8>,
}

#[derive(Deserialize)]
struct CutoutResponse {
    width: u32,
    height: u32,
    rgba: String,
}

/// Client for the hosted function endpoints.
pub struct FunctionsClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl FunctionsClient {
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// Invoke a named function with an optional JSON body.
    pub async fn invoke<T: Serialize>(
        &self,
        function_name: &str,
        body: Option<T>,
        options: Option<FunctionOptions>,
    ) -> Result<Value> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FunctionsError::UrlError(url::ParseError::EmptyHost))?
            .push("functions")
            .push("v1")
            .push(function_name);

        let opts = options.unwrap_or_default();

        let mut request = self
            .http_client
            .post(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key));

        if let Some(headers) = opts.headers {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        if let Some(body_data) = body {
            request = request.json(&body_data);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            log::warn!("function {} failed: {}", function_name, error_text);
            return Err(FunctionsError::FunctionError(error_text));
        }

        Ok(response.json::<Value>().await?)
    }

    /// Ask the completion endpoint for on-page SEO recommendations.
    ///
    /// The returned list of `{priority, category, recommendation, impact}`
    /// objects is the only structured contract with that endpoint.
    pub async fn seo_recommendations(
        &self,
        page_url: &str,
        keyword: &str,
        analysis: &PageAnalysis,
    ) -> Result<Vec<SeoRecommendation>> {
        let payload = serde_json::json!({
            "url": page_url,
            "keyword": keyword,
            "analysis": analysis,
        });

        let value = self
            .invoke("seo-recommendations", Some(payload), None)
            .await?;

        serde_json::from_value(value).map_err(FunctionsError::JsonError)
    }

    /// Send an image to the segmentation model and decode the cutout.
    pub async fn remove_background(&self, image: &[u8]) -> Result<Cutout> {
        let payload = serde_json::json!({
            "image": BASE64.encode(image),
        });

        let value = self.invoke("remove-background", Some(payload), None).await?;

        let response: CutoutResponse = serde_json::from_value(value)?;
        let rgba = BASE64
            .decode(&response.rgba)
            .map_err(|e| FunctionsError::InvalidPayload(format!("cutout is not base64: {}", e)))?;

        let expected = response.width as usize * response.height as usize * 4;
        if rgba.len() != expected {
            return Err(FunctionsError::InvalidPayload(format!(
                "cutout has {} bytes, expected {} for {}x{} RGBA",
                rgba.len(),
                expected,
                response.width,
                response.height
            )));
        }

        Ok(Cutout {
            width: response.width,
            height: response.height,
            rgba,
        })
    }
}
