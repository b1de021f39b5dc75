//! Typed change events.

use chrono::{DateTime, Utc};
use envoy_core::records::{ContactRequest, ContentItem, NavigationItem, User, WaitingListEntry};
use envoy_core::types::DbId;
use serde::Serialize;

/// What happened to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Change<T> {
    Added(T),
    Updated(T),
    Deleted(DbId),
}

impl<T> Change<T> {
    /// `"added"`, `"updated"` or `"deleted"`.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}

/// Event families a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Content,
    Navigation,
    Users,
    Contacts,
    WaitingList,
    Settings,
}

impl Topic {
    /// Prefix used in event names, e.g. `content` in `content-added`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Navigation => "navigation",
            Self::Users => "user",
            Self::Contacts => "contact",
            Self::WaitingList => "waiting-list",
            Self::Settings => "settings",
        }
    }
}

/// A mutation that happened somewhere on the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "topic", content = "change", rename_all = "kebab-case")]
pub enum SiteEvent {
    Content(Change<ContentItem>),
    Navigation(Change<NavigationItem>),
    User(Change<User>),
    Contact(Change<ContactRequest>),
    WaitingList(Change<WaitingListEntry>),
    SettingSaved {
        name: String,
        saved_at: DateTime<Utc>,
    },
}

impl SiteEvent {
    pub fn setting_saved(name: impl Into<String>) -> Self {
        Self::SettingSaved {
            name: name.into(),
            saved_at: Utc::now(),
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            Self::Content(_) => Topic::Content,
            Self::Navigation(_) => Topic::Navigation,
            Self::User(_) => Topic::Users,
            Self::Contact(_) => Topic::Contacts,
            Self::WaitingList(_) => Topic::WaitingList,
            Self::SettingSaved { .. } => Topic::Settings,
        }
    }

    /// Hyphenated event name, e.g. `content-added` or `navigation-deleted`.
    pub fn name(&self) -> String {
        let verb = match self {
            Self::Content(c) => c.verb(),
            Self::Navigation(c) => c.verb(),
            Self::User(c) => c.verb(),
            Self::Contact(c) => c.verb(),
            Self::WaitingList(c) => c.verb(),
            Self::SettingSaved { .. } => "saved",
        };
        format!("{}-{verb}", self.topic().prefix())
    }
}
