//! File upload helper.
//!
//! Sits between the drag-and-drop / picker surface and the storage
//! service: validates each candidate against an allow-list of MIME types, a
//! size cap and a batch count cap, uploads the survivors one by one and
//! hands back one public URL per accepted file. There is no batch
//! atomicity: a file that fails to upload is reported and the rest carry
//! on; files already stored stay stored.

use bytes::Bytes;
use uuid::Uuid;

use crate::notify::Notifier;
use folio_storage::{FileOptions, StorageClient};

/// Validation and batch limits for one upload surface.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Accepted MIME types, e.g. `["image/png", "image/jpeg"]`.
    pub allowed_types: Vec<String>,
    pub max_size_mb: u64,
    pub max_files: usize,
}

impl UploadPolicy {
    pub fn images(max_size_mb: u64, max_files: usize) -> Self {
        Self {
            allowed_types: vec![
                "image/png".to_string(),
                "image/jpeg".to_string(),
                "image/webp".to_string(),
            ],
            max_size_mb,
            max_files,
        }
    }

    fn max_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

/// One file handed to the helper.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Why a file was dropped from the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType(String),
    TooLarge { size_bytes: u64, limit_mb: u64 },
    TooMany { limit: usize },
    UploadFailed(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::UnsupportedType(ty) => write!(f, "unsupported file type {}", ty),
            RejectReason::TooLarge { size_bytes, limit_mb } => {
                write!(f, "file is {} bytes, limit is {} MB", size_bytes, limit_mb)
            }
            RejectReason::TooMany { limit } => write!(f, "batch limited to {} files", limit),
            RejectReason::UploadFailed(message) => write!(f, "upload failed: {}", message),
        }
    }
}

/// Per-file result of a batch.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Accepted { name: String, url: String },
    Rejected { name: String, reason: RejectReason },
}

/// Summary of one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Public URLs of the stored files, one per accepted file.
    pub fn accepted_urls(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FileOutcome::Accepted { url, .. } => Some(url.clone()),
                FileOutcome::Rejected { .. } => None,
            })
            .collect()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_urls().len()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }
}

/// Upload helper bound to one bucket and policy.
pub struct Uploader {
    storage: StorageClient,
    bucket: String,
    policy: UploadPolicy,
    notifier: Notifier,
}

impl Uploader {
    pub fn new(
        storage: StorageClient,
        bucket: &str,
        policy: UploadPolicy,
        notifier: Notifier,
    ) -> Self {
        Self {
            storage,
            bucket: bucket.to_string(),
            policy,
            notifier,
        }
    }

    /// Validate and upload a batch.
    pub async fn upload_batch(&self, files: Vec<CandidateFile>) -> BatchReport {
        self.upload_batch_with_progress(files, |_| {}).await
    }

    /// Validate and upload a batch, reporting coarse progress after each
    /// file (completed files over total files).
    pub async fn upload_batch_with_progress(
        &self,
        files: Vec<CandidateFile>,
        mut on_progress: impl FnMut(f32),
    ) -> BatchReport {
        let total = files.len();
        let mut report = BatchReport::default();

        for (index, file) in files.into_iter().enumerate() {
            let outcome = if index >= self.policy.max_files {
                self.reject(
                    file.name,
                    RejectReason::TooMany {
                        limit: self.policy.max_files,
                    },
                )
            } else if let Some(reason) = self.validate(&file) {
                self.reject(file.name, reason)
            } else {
                self.store(file).await
            };

            report.outcomes.push(outcome);
            on_progress((index + 1) as f32 / total.max(1) as f32);
        }

        report
    }

    fn validate(&self, file: &CandidateFile) -> Option<RejectReason> {
        if !self
            .policy
            .allowed_types
            .iter()
            .any(|ty| ty.eq_ignore_ascii_case(&file.content_type))
        {
            return Some(RejectReason::UnsupportedType(file.content_type.clone()));
        }

        let size = file.bytes.len() as u64;
        if size > self.policy.max_bytes() {
            return Some(RejectReason::TooLarge {
                size_bytes: size,
                limit_mb: self.policy.max_size_mb,
            });
        }

        None
    }

    async fn store(&self, file: CandidateFile) -> FileOutcome {
        let path = Self::object_path(&file.name);
        let options = FileOptions::new().with_content_type(&file.content_type);

        let bucket = self.storage.from(&self.bucket);
        match bucket.upload(&path, file.bytes, Some(options)).await {
            Ok(_) => {
                let url = bucket.public_url(&path);
                self.notifier.success(format!("Uploaded {}", file.name));
                FileOutcome::Accepted {
                    name: file.name,
                    url,
                }
            }
            Err(err) => self.reject(file.name, RejectReason::UploadFailed(err.to_string())),
        }
    }

    fn reject(&self, name: String, reason: RejectReason) -> FileOutcome {
        self.notifier
            .error(format!("Skipped {}: {}", name, reason));
        FileOutcome::Rejected { name, reason }
    }

    /// Collision-free object path: a fresh UUID plus the original
    /// extension, so display names never leak into URLs.
    fn object_path(name: &str) -> String {
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => {
                format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase())
            }
            _ => Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_keeps_extension_only() {
        let path = Uploader::object_path("Holiday Photo.JPG");
        assert!(path.ends_with(".jpg"));
        assert!(!path.contains("Holiday"));

        let bare = Uploader::object_path("README");
        assert!(!bare.contains('.'));
    }

    #[test]
    fn policy_size_limit_is_in_bytes() {
        let policy = UploadPolicy::images(2, 5);
        assert_eq!(policy.max_bytes(), 2 * 1024 * 1024);
    }
}
