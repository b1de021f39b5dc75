//! Site navigation entries.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::navigation::DEFAULT_NAVIGATION;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: DbId,
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub order: i32,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNavigationItem {
    pub label: String,
    pub path: String,
    /// Appended after the last entry when omitted.
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPatch {
    pub label: Option<String>,
    pub path: Option<String>,
    pub order: Option<i32>,
}

fn validate_path(path: &str) -> Result<(), CoreError> {
    if !path.starts_with('/') && !path.starts_with("http") {
        return Err(CoreError::Validation(format!(
            "Navigation path '{path}' must start with '/' or be an absolute URL"
        )));
    }
    Ok(())
}

impl NewNavigationItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.label.trim().is_empty() {
            return Err(CoreError::Validation(
                "Navigation label must not be empty".to_string(),
            ));
        }
        validate_path(&self.path)
    }
}

impl NavigationPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if matches!(&self.label, Some(l) if l.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Navigation label must not be empty".to_string(),
            ));
        }
        match &self.path {
            Some(path) => validate_path(path),
            None => Ok(()),
        }
    }
}

impl NavigationItem {
    pub fn from_new(id: DbId, new: NewNavigationItem, order: i32, now: Timestamp) -> Self {
        Self {
            id,
            label: new.label,
            path: new.path,
            order: new.order.unwrap_or(order),
            last_updated: now,
        }
    }

    pub fn apply(&mut self, patch: NavigationPatch, now: Timestamp) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(path) = patch.path {
            self.path = path;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.last_updated = now;
    }
}

/// The compiled default navigation as records, ids and order starting at 1.
pub fn default_navigation(now: Timestamp) -> Vec<NavigationItem> {
    DEFAULT_NAVIGATION
        .iter()
        .zip(1..)
        .map(|(&(label, path), n)| NavigationItem {
            id: DbId::from(n),
            label: label.to_string(),
            path: path.to_string(),
            order: n,
            last_updated: now,
        })
        .collect()
}
