//! Admin users of the CMS.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Editor,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// Validate an email address, returning a `Validation` error naming `field`.
pub fn validate_email(field: &str, email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "{field} '{email}' is not a valid email address"
        )));
    }
    Ok(())
}

impl NewUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "User name must not be empty".to_string(),
            ));
        }
        validate_email("User email", &self.email)
    }
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.email {
            Some(email) => validate_email("User email", email),
            None => Ok(()),
        }
    }
}

impl User {
    pub fn from_new(id: DbId, new: NewUser, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email.to_lowercase(),
            role: new.role.unwrap_or_default(),
            last_updated: now,
        }
    }

    pub fn apply(&mut self, patch: UserPatch, now: Timestamp) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email.to_lowercase();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        self.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_email() {
        let new = NewUser {
            name: "Ana".into(),
            email: "not-an-email".into(),
            role: None,
        };
        assert!(new.validate().is_err());
    }

    #[test]
    fn email_is_lowercased_and_role_defaults_to_editor() {
        let new = NewUser {
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
            role: None,
        };
        new.validate().unwrap();
        let user = User::from_new(1, new, chrono::Utc::now());
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role, UserRole::Editor);
    }
}
