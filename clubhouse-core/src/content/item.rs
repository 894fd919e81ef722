//! Content records: blog posts and announcements

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainId;

/// What kind of content an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    BlogPost,
    Announcement,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::BlogPost => f.write_str("blog_post"),
            ContentKind::Announcement => f.write_str("announcement"),
        }
    }
}

/// Workflow state of a content item.
///
/// Draft is the only editable state; the only route back to it from
/// Pending, Published, or Rejected is an explicit return-to-draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Pending,
    Published,
    Rejected,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Pending => "pending",
            ContentStatus::Published => "published",
            ContentStatus::Rejected => "rejected",
        };
        f.write_str(tag)
    }
}

/// Who wrote an item. Email is the identity key used for author checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// A blog post or announcement moving through the approval workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique key, stable across status changes
    pub slug: String,
    pub kind: ContentKind,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub author: Author,
    /// Owning domain, `None` for club-wide items
    pub domain: Option<DomainId>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation date
    pub date: NaiveDate,
    /// Set when the item was last approved, cleared on return to draft
    pub published_at: Option<NaiveDate>,
    pub status: ContentStatus,
}

/// Input for creating a content item
#[derive(Debug, Clone)]
pub struct NewContent {
    pub slug: Option<String>,
    pub kind: ContentKind,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub domain: Option<DomainId>,
    pub tags: Vec<String>,
}

impl NewContent {
    pub fn new(kind: ContentKind, title: impl Into<String>) -> Self {
        Self {
            slug: None,
            kind,
            title: title.into(),
            excerpt: String::new(),
            body: String::new(),
            domain: None,
            tags: Vec::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The slug to store under: the one provided, or a fresh id
    pub(crate) fn slug_or_fresh(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => Uuid::new_v4().to_string(),
        }
    }
}

/// Partial update applied to a draft. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ContentPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub(crate) fn apply(&self, item: &mut ContentItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            item.excerpt = excerpt.clone();
        }
        if let Some(body) = &self.body {
            item.body = body.clone();
        }
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
    }
}
