//! Folio Rust Client Library
//!
//! Client toolkit for the Folio portfolio site. It bundles the pieces the
//! admin surface and the public tool pages are built from: a generic CRUD
//! resource controller over the hosted table service, an object storage
//! upload helper, the admin auth gate, hosted function invocations (SEO
//! recommendations, background removal) and the pure page tools.

pub mod config;
pub mod error;
pub mod notify;
pub mod resource;
pub mod tools;
pub mod upload;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::notify::Notifier;
use crate::resource::{Resource, ResourceController};
use crate::upload::{UploadPolicy, Uploader};
use folio_auth::{AdminGate, AuthClient};
use folio_functions::FunctionsClient;
use folio_storage::StorageClient;
use folio_table::TableClient;

/// The main entry point for the Folio client
pub struct Folio {
    /// The base URL of the hosted backend
    pub url: String,
    /// The anonymous API key of the hosted backend
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for session management
    pub auth: AuthClient,
    /// Client options
    pub options: ClientOptions,
    notifier: Notifier,
}

impl Folio {
    /// Create a new Folio client
    ///
    /// # Example
    ///
    /// ```
    /// use folio::Folio;
    ///
    /// let folio = Folio::new("https://backend.folio.example", "anon-key");
    /// ```
    pub fn new(url: &str, key: &str) -> Self {
        Self::new_with_options(url, key, ClientOptions::default())
    }

    /// Create a new Folio client with custom options
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|_| Client::new());

        let auth = AuthClient::new(url, key, http_client.clone());

        Self {
            url: url.to_string(),
            key: key.to_string(),
            http_client,
            auth,
            options,
            notifier: Notifier::new(),
        }
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Admin gate over the shared auth client
    pub fn admin_gate(&self) -> AdminGate<'_> {
        AdminGate::new(&self.auth)
    }

    /// Raw table access for one table or view
    pub fn from(&self, table: &str) -> TableClient {
        TableClient::new(&self.url, &self.key, table, self.http_client.clone())
    }

    /// Get a storage client for file operations
    pub fn storage(&self) -> StorageClient {
        StorageClient::new(&self.url, &self.key, self.http_client.clone())
    }

    /// Get a functions client for hosted invocations
    pub fn functions(&self) -> FunctionsClient {
        FunctionsClient::new(&self.url, &self.key, self.http_client.clone())
    }

    /// The shared notification center
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Build the resource controller for a record type.
    ///
    /// The current session's access token, if any, is attached so
    /// row-level security sees the signed-in admin.
    pub fn controller<T: Resource + Clone>(&self) -> ResourceController<T> {
        let controller = ResourceController::new(
            &self.url,
            &self.key,
            self.http_client.clone(),
            self.notifier.clone(),
        );

        match self.auth.current_session() {
            Some(session) => controller.with_access_token(&session.access_token),
            None => controller,
        }
    }

    /// Build an upload helper for a bucket with the given policy
    pub fn uploader(&self, bucket: &str, policy: UploadPolicy) -> Uploader {
        Uploader::new(self.storage(), bucket, policy, self.notifier.clone())
    }

    /// Upload helper for the photo gallery bucket
    pub fn photo_uploader(&self, policy: UploadPolicy) -> Uploader {
        let bucket = self.options.photo_bucket.clone();
        self.uploader(&bucket, policy)
    }

    /// Upload helper for the blog cover bucket
    pub fn blog_cover_uploader(&self, policy: UploadPolicy) -> Uploader {
        let bucket = self.options.blog_bucket.clone();
        self.uploader(&bucket, policy)
    }

    /// Upload helper for the product image bucket
    pub fn product_image_uploader(&self, policy: UploadPolicy) -> Uploader {
        let bucket = self.options.product_bucket.clone();
        self.uploader(&bucket, policy)
    }

    /// Render URL for a QR code against the configured endpoint
    pub fn qr_url(&self, data: &str, size: u32) -> String {
        tools::qr::render_url(&self.options.qr_endpoint, data, size)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::notify::{Notice, NoticeLevel, Notifier};
    pub use crate::resource::{Resource, ResourceController, ResourceSchema};
    pub use crate::upload::{CandidateFile, UploadPolicy, Uploader};
    pub use crate::Folio;
    pub use folio_auth::{AdminGate, GateState, Session, SignInCredentials, User};
}
