//! Record types for the managed resources.
//!
//! One struct per backing table. Ids and timestamps are assigned by the
//! storage layer, so they are optional on the wire: a form submission
//! omits them and the stored representation carries them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Resource, ResourceSchema, SlugPolicy, SlugRule};
use folio_table::SortOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for BlogPost {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "blog_posts",
        order_by: "created_at",
        order: SortOrder::Descending,
        required: &["title", "content"],
        // Published URLs must not break when a title is edited.
        slug: Some(SlugRule {
            source: "title",
            target: "slug",
            policy: SlugPolicy::OnCreate,
        }),
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub purchase_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Product {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "products",
        order_by: "created_at",
        order: SortOrder::Descending,
        required: &["title"],
        slug: Some(SlugRule {
            source: "title",
            target: "slug",
            policy: SlugPolicy::OnEveryWrite,
        }),
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub issued_on: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Certification {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "certifications",
        order_by: "issued_on",
        order: SortOrder::Descending,
        required: &["title", "issuer"],
        slug: None,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub started_on: Option<String>,
    #[serde(default)]
    pub ended_on: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for ExperienceEntry {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "experience_entries",
        order_by: "started_on",
        order: SortOrder::Descending,
        required: &["role", "company"],
        slug: None,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Skill {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "skills",
        order_by: "name",
        order: SortOrder::Ascending,
        required: &["name"],
        slug: None,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for SocialLink {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "social_links",
        order_by: "display_order",
        order: SortOrder::Ascending,
        required: &["platform", "url"],
        slug: None,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Project {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "projects",
        order_by: "created_at",
        order: SortOrder::Descending,
        required: &["title", "description"],
        slug: Some(SlugRule {
            source: "title",
            target: "slug",
            policy: SlugPolicy::OnCreate,
        }),
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeIdea {
    pub id: String,
    pub symbol: String,
    /// "long" or "short"; free-form on the wire.
    pub direction: String,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub stop_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for TradeIdea {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "trade_ideas",
        order_by: "created_at",
        order: SortOrder::Descending,
        required: &["symbol", "direction"],
        slug: None,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub taken_on: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Photo {
    const SCHEMA: ResourceSchema = ResourceSchema {
        table: "photos",
        order_by: "created_at",
        order: SortOrder::Descending,
        required: &["title", "url"],
        slug: None,
    };
}
