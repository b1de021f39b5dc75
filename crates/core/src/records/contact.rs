//! Contact-form submissions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::records::user::validate_email;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    pub submitted_at: Timestamp,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Admin-side changes to a submission; the submitted content is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub status: Option<ContactStatus>,
}

impl NewContactRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name must not be empty".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(CoreError::Validation(
                "Message must not be empty".to_string(),
            ));
        }
        validate_email("Contact email", &self.email)
    }
}

impl ContactRequest {
    pub fn from_new(id: DbId, new: NewContactRequest, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            subject: new.subject,
            message: new.message,
            status: ContactStatus::New,
            submitted_at: now,
            last_updated: now,
        }
    }

    pub fn apply(&mut self, patch: ContactPatch, now: Timestamp) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.last_updated = now;
    }
}
