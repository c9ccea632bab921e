//! Configuration options for the Folio client

use std::time::Duration;

/// Configuration options for the Folio client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to the shared HTTP client
    pub request_timeout: Option<Duration>,

    /// Third-party endpoint the QR tool builds render URLs against
    pub qr_endpoint: String,

    /// Bucket holding blog cover images
    pub blog_bucket: String,

    /// Bucket holding product images
    pub product_bucket: String,

    /// Bucket holding the photo gallery
    pub photo_bucket: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            blog_bucket: "blog-covers".to_string(),
            product_bucket: "product-images".to_string(),
            photo_bucket: "photos".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the QR render endpoint
    pub fn with_qr_endpoint(mut self, value: &str) -> Self {
        self.qr_endpoint = value.to_string();
        self
    }

    /// Set the blog cover bucket
    pub fn with_blog_bucket(mut self, value: &str) -> Self {
        self.blog_bucket = value.to_string();
        self
    }

    /// Set the product image bucket
    pub fn with_product_bucket(mut self, value: &str) -> Self {
        self.product_bucket = value.to_string();
        self
    }

    /// Set the photo gallery bucket
    pub fn with_photo_bucket(mut self, value: &str) -> Self {
        self.photo_bucket = value.to_string();
        self
    }
}
