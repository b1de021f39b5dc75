//! CMS content items (pages, blog posts, services, case studies, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::slug::{page_path, slugify};
use crate::types::{DbId, Timestamp};

/// Kind of content item. Unrecognised kinds round-trip through `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    Page,
    #[serde(rename = "Blog Post")]
    BlogPost,
    Service,
    #[serde(rename = "Case Study")]
    CaseStudy,
    Testimonial,
    Portfolio,
    #[serde(rename = "Team Member")]
    TeamMember,
    #[serde(rename = "FAQ")]
    Faq,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A persisted content item.
///
/// Fields the site does not model explicitly (SEO blocks, gallery images,
/// per-type extras) are kept in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub show_in_navigation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<Timestamp>,
    pub last_updated: Timestamp,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a content item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub title: String,
    #[serde(rename = "type", default)]
    pub content_type: ContentType,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<ContentStatus>,
    #[serde(default)]
    pub show_in_navigation: bool,
    pub publish_date: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial update for a content item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<ContentStatus>,
    pub show_in_navigation: Option<bool>,
    pub publish_date: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewContent {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Content title must not be empty".to_string(),
            ));
        }
        if resolve_slug(self.slug.as_deref(), &self.title).is_empty() {
            return Err(CoreError::Validation(format!(
                "Content '{}' needs a slug: its title has no URL-safe characters",
                self.title
            )));
        }
        Ok(())
    }
}

impl ContentPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Content title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Normalise a caller-supplied slug, falling back to the title when it
/// normalises to nothing.
fn resolve_slug(explicit: Option<&str>, title: &str) -> String {
    explicit
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| slugify(title))
}

impl ContentItem {
    /// Build a new item from its creation payload.
    ///
    /// Blog posts without a publish date are stamped with `now`.
    pub fn from_new(id: DbId, new: NewContent, now: Timestamp) -> Self {
        let slug = resolve_slug(new.slug.as_deref(), &new.title);
        let publish_date = match new.content_type {
            ContentType::BlogPost => new.publish_date.or(Some(now)),
            _ => new.publish_date,
        };
        Self {
            id,
            title: new.title,
            content_type: new.content_type,
            slug,
            description: new.description.unwrap_or_default(),
            content: new.content.unwrap_or_default(),
            status: new.status.unwrap_or_default(),
            show_in_navigation: new.show_in_navigation,
            publish_date,
            last_updated: now,
            extra: new.extra,
        }
    }

    /// Shallow-merge a patch into this item.
    ///
    /// The slug follows an explicit patch slug; otherwise it is re-derived
    /// from a new title when the current slug is empty or was itself derived
    /// from the old title. Hand-edited slugs survive title changes.
    pub fn apply(&mut self, patch: ContentPatch, now: Timestamp) {
        let slug_was_derived = self.slug.is_empty() || self.slug == slugify(&self.title);

        if let Some(title) = patch.title {
            self.title = title;
        }
        // A slug never becomes empty: when nothing URL-safe is left the
        // current slug is kept.
        let next_slug = match patch.slug {
            Some(slug) => resolve_slug(Some(&slug), &self.title),
            None if slug_was_derived => slugify(&self.title),
            None => String::new(),
        };
        if !next_slug.is_empty() {
            self.slug = next_slug;
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(show) = patch.show_in_navigation {
            self.show_in_navigation = show;
        }
        if patch.publish_date.is_some() {
            self.publish_date = patch.publish_date;
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
        self.last_updated = now;
    }

    /// Whether this item should currently have a navigation entry.
    ///
    /// A page without a slug has no path of its own and never does.
    pub fn wants_navigation(&self) -> bool {
        self.content_type == ContentType::Page && self.show_in_navigation && !self.slug.is_empty()
    }

    /// Error when another item in `others` already uses this item's slug.
    pub fn check_slug_unique(&self, others: &[ContentItem]) -> Result<(), CoreError> {
        match others
            .iter()
            .find(|other| other.id != self.id && other.slug == self.slug)
        {
            Some(other) => Err(CoreError::Validation(format!(
                "Slug '{}' is already used by content {}",
                self.slug, other.id
            ))),
            None => Ok(()),
        }
    }

    /// Path the item is reachable under, `/` + slug.
    pub fn path(&self) -> String {
        page_path(&self.slug)
    }
}
