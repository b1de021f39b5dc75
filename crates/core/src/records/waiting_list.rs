//! Waiting-list sign-ups for services that have not launched yet.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::records::user::validate_email;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListEntry {
    pub id: DbId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWaitingListEntry {
    pub email: String,
    pub name: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListPatch {
    pub name: Option<String>,
    pub service: Option<String>,
}

impl NewWaitingListEntry {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email("Waiting list email", &self.email)
    }
}

impl WaitingListEntry {
    pub fn from_new(id: DbId, new: NewWaitingListEntry, now: Timestamp) -> Self {
        Self {
            id,
            email: new.email.to_lowercase(),
            name: new.name,
            service: new.service,
            last_updated: now,
        }
    }

    pub fn apply(&mut self, patch: WaitingListPatch, now: Timestamp) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.service.is_some() {
            self.service = patch.service;
        }
        self.last_updated = now;
    }
}
