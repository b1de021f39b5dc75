//! Named site settings: the known setting names, their compiled-in default
//! documents, and the resolution type returned when reading a setting.
//!
//! Each setting is a single JSON document stored under its name. The storage
//! layer does not enforce a schema; the defaults below document the shape the
//! site expects for each name.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CoreError;

/// Names that ship with a compiled default, in seeding order.
pub const KNOWN_SETTINGS: &[&str] = &[
    "header",
    "footer",
    "hero",
    "contact",
    "services",
    "about",
    "references",
    "faq",
];

/// Whether `name` is one of the [`KNOWN_SETTINGS`].
pub fn is_known_setting(name: &str) -> bool {
    KNOWN_SETTINGS.contains(&name)
}

/// Build the error returned for a name with neither a stored row nor a default.
pub fn unknown_setting(name: &str) -> CoreError {
    CoreError::UnknownSetting {
        name: name.to_string(),
        known: KNOWN_SETTINGS.to_vec(),
    }
}

/// Compiled default document for a setting, or `None` for unknown names.
pub fn default_setting(name: &str) -> Option<Value> {
    let value = match name {
        "header" => json!({
            "logo": "/images/logo.svg",
            "logoAlt": "Trojan Envoy",
            "showSearch": true,
            "showLanguageSwitcher": true,
            "ctaButton": { "text": "Get in touch", "path": "/contact" }
        }),
        "footer" => json!({
            "companyDescription": "A full-service digital agency building brands, products and growth.",
            "copyright": "© Trojan Envoy. All rights reserved.",
            "socialLinks": [
                { "platform": "linkedin", "url": "https://www.linkedin.com" },
                { "platform": "instagram", "url": "https://www.instagram.com" }
            ],
            "columns": [
                { "title": "Company", "links": [
                    { "label": "About", "path": "/about" },
                    { "label": "Contact", "path": "/contact" }
                ]},
                { "title": "Services", "links": [
                    { "label": "All services", "path": "/services" }
                ]}
            ],
            "showNewsletter": true
        }),
        "hero" => json!({
            "title": "We build digital experiences that move people",
            "subtitle": "Strategy, design and engineering under one roof.",
            "primaryCta": { "text": "Our services", "path": "/services" },
            "secondaryCta": { "text": "Contact us", "path": "/contact" },
            "backgroundImage": null,
            "stats": [
                { "value": "120+", "label": "Projects delivered" },
                { "value": "15", "label": "Countries" }
            ]
        }),
        "contact" => json!({
            "email": "hello@trojanenvoy.com",
            "phone": "",
            "address": "",
            "mapEmbedUrl": null,
            "formFields": ["name", "email", "phone", "company", "subject", "message"],
            "successMessage": "Thank you! We will be in touch shortly."
        }),
        "services" => json!({
            "title": "Our services",
            "subtitle": "Everything you need to launch and grow.",
            "items": []
        }),
        "about" => json!({
            "title": "About us",
            "description": "We are a team of strategists, designers and engineers.",
            "mission": "",
            "vision": "",
            "values": [],
            "team": []
        }),
        "references" => json!({
            "title": "Trusted by",
            "subtitle": "",
            "items": []
        }),
        "faq" => json!({
            "title": "Frequently asked questions",
            "items": []
        }),
        _ => return None,
    };
    Some(value)
}

/// Why a compiled default was served instead of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No row exists for the name.
    Missing,
    /// A row exists but its value is not valid JSON.
    Malformed,
    /// The database could not be reached.
    Unavailable,
}

impl FallbackReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Outcome of resolving a setting by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The persisted value.
    Stored(Value),
    /// The compiled default, with the reason it was used.
    Default { value: Value, reason: FallbackReason },
}

impl Resolved {
    pub fn value(&self) -> &Value {
        match self {
            Self::Stored(value) | Self::Default { value, .. } => value,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Stored(value) | Self::Default { value, .. } => value,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Stored(_) => None,
            Self::Default { reason, .. } => Some(*reason),
        }
    }

    /// `"stored"` or `"default"`.
    pub fn source(&self) -> &'static str {
        if self.is_default() {
            "default"
        } else {
            "stored"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn every_known_setting_has_an_object_default() {
        for name in KNOWN_SETTINGS {
            let value = default_setting(name).expect("known setting must have a default");
            assert!(value.is_object(), "default for {name} should be an object");
        }
    }

    #[test]
    fn unknown_name_has_no_default() {
        assert!(default_setting("sidebar").is_none());
        assert!(!is_known_setting("sidebar"));
    }

    #[test]
    fn unknown_setting_error_lists_known_names() {
        assert_matches!(
            unknown_setting("sidebar"),
            CoreError::UnknownSetting { name, known } if name == "sidebar" && known.len() == KNOWN_SETTINGS.len()
        );
    }

    #[test]
    fn resolved_exposes_source_and_reason() {
        let stored = Resolved::Stored(json!({"a": 1}));
        assert_eq!(stored.source(), "stored");
        assert_eq!(stored.fallback_reason(), None);

        let fallback = Resolved::Default {
            value: json!({}),
            reason: FallbackReason::Malformed,
        };
        assert!(fallback.is_default());
        assert_eq!(fallback.fallback_reason(), Some(FallbackReason::Malformed));
        assert_eq!(fallback.into_value(), json!({}));
    }
}
