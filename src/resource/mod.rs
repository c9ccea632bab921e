//! Generic resource management for the admin panels.
//!
//! Every admin panel (blog posts, products, photos, ...) used to carry its
//! own copy of the same fetch/insert/update/delete wiring. The pattern is
//! factored into one [`ResourceController`] parameterized by a static
//! [`ResourceSchema`]: table name, ordering, required fields and the slug
//! derivation rule. The controller owns a disposable row cache that is
//! re-fetched after every mutation; there is no optimistic patching and no
//! retry. A failed remote call is terminal for that user action.

mod records;
mod slug;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::Error;
use crate::notify::Notifier;
use folio_table::{SortOrder, TableClient};

pub use records::{
    BlogPost, Certification, ExperienceEntry, Photo, Product, Project, Skill, SocialLink,
    TradeIdea,
};
pub use slug::slugify;

/// When the derived slug is (re)computed.
///
/// Historically some panels recomputed the slug from an edited title and
/// others kept the original; the schema now states the policy per resource
/// type instead of leaving it to copy-paste drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugPolicy {
    /// Slug is fixed at creation; edits never touch it (stable URLs).
    OnCreate,
    /// Slug follows the source field on every write.
    OnEveryWrite,
}

/// Slug derivation rule for one resource type.
#[derive(Debug, Clone, Copy)]
pub struct SlugRule {
    /// Field the slug is derived from (usually the title).
    pub source: &'static str,
    /// Field the slug is written to.
    pub target: &'static str,
    pub policy: SlugPolicy,
}

/// Static description of one managed resource type.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Backing table name.
    pub table: &'static str,
    /// Ordering column for `list`.
    pub order_by: &'static str,
    pub order: SortOrder,
    /// Fields that must be present and non-empty before any network call.
    pub required: &'static [&'static str],
    pub slug: Option<SlugRule>,
}

/// A record type managed through the generic controller.
pub trait Resource: DeserializeOwned {
    const SCHEMA: ResourceSchema;
}

/// Generic list/create/update/delete controller for one resource type.
pub struct ResourceController<T: Resource> {
    base_url: String,
    api_key: String,
    http_client: Client,
    access_token: Option<String>,
    notifier: Notifier,
    rows: RwLock<Vec<T>>,
    /// Ticket counter for list fetches; a response only commits to the
    /// cache if no newer fetch has been issued since it started.
    generation: AtomicU64,
}

impl<T: Resource + Clone> ResourceController<T> {
    pub fn new(base_url: &str, api_key: &str, http_client: Client, notifier: Notifier) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
            access_token: None,
            notifier,
            rows: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Attach the signed-in user's access token to every table request.
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    /// Snapshot of the cached rows.
    pub fn rows(&self) -> Vec<T> {
        self.rows.read().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Fetch all rows ordered by the schema's column.
    ///
    /// On failure the previous cache is left untouched. A stale response
    /// (one that finished after a newer `list` started) is returned to the
    /// caller but never committed to the cache.
    pub async fn list(&self) -> Result<Vec<T>, Error> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self
            .table()?
            .select("*")
            .order(T::SCHEMA.order_by, T::SCHEMA.order)
            .execute::<T>()
            .await;

        match result {
            Ok(fetched) => {
                if self.generation.load(Ordering::SeqCst) == ticket {
                    if let Ok(mut guard) = self.rows.write() {
                        *guard = fetched.clone();
                    }
                } else {
                    log::debug!(
                        "discarding stale {} list response (ticket {})",
                        T::SCHEMA.table,
                        ticket
                    );
                }
                Ok(fetched)
            }
            Err(err) => {
                self.notifier
                    .error(format!("Loading {} failed: {}", T::SCHEMA.table, err));
                Err(err.into())
            }
        }
    }

    /// Validate, derive the slug and insert a new record, then re-fetch.
    ///
    /// On validation failure nothing is sent and a blocking notice is
    /// raised; on remote failure the submitted fields are returned to the
    /// caller untouched inside the error so the form can be retried.
    pub async fn create(&self, mut fields: Map<String, Value>) -> Result<Value, Error> {
        self.check_required(&fields)?;

        if let Some(rule) = T::SCHEMA.slug {
            Self::derive_slug(&mut fields, &rule);
        }

        let label = format!("Creating {} record", T::SCHEMA.table);
        let result = self.table()?.insert(Value::Object(fields)).await;
        self.notifier.report(&label, &result);

        let stored = result?;
        let _ = self.list().await;
        Ok(stored)
    }

    /// Validate and update the record with the given id, then re-fetch.
    ///
    /// The slug is only recomputed when the schema's policy says so.
    pub async fn update(&self, id: &str, mut fields: Map<String, Value>) -> Result<Value, Error> {
        self.check_required(&fields)?;

        if let Some(rule) = T::SCHEMA.slug {
            if rule.policy == SlugPolicy::OnEveryWrite {
                Self::derive_slug(&mut fields, &rule);
            }
        }

        let label = format!("Updating {} record", T::SCHEMA.table);
        let result = self
            .table()?
            .eq("id", id)
            .update(Value::Object(fields))
            .await;
        self.notifier.report(&label, &result);

        let stored = result?;
        let _ = self.list().await;
        Ok(stored)
    }

    /// Delete the record with the given id, then re-fetch.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let label = format!("Deleting {} record", T::SCHEMA.table);
        let result = self.table()?.eq("id", id).delete().await;
        self.notifier.report(&label, &result);

        result?;
        let _ = self.list().await;
        Ok(())
    }

    fn table(&self) -> Result<TableClient, Error> {
        let client = TableClient::new(
            &self.base_url,
            &self.api_key,
            T::SCHEMA.table,
            self.http_client.clone(),
        );

        match &self.access_token {
            Some(token) => Ok(client.with_auth(token)?),
            None => Ok(client),
        }
    }

    fn check_required(&self, fields: &Map<String, Value>) -> Result<(), Error> {
        for field in T::SCHEMA.required {
            let present = match fields.get(*field) {
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Null) | None => false,
                Some(_) => true,
            };

            if !present {
                let message = format!("{} is required", field);
                self.notifier.blocking_error(&message);
                return Err(Error::Validation(message));
            }
        }

        Ok(())
    }

    fn derive_slug(fields: &mut Map<String, Value>, rule: &SlugRule) {
        if let Some(Value::String(source)) = fields.get(rule.source) {
            let slug = slugify(source);
            fields.insert(rule.target.to_string(), Value::String(slug));
        }
    }
}
