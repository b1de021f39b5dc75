//! Named settings with compiled-in defaults.
//!
//! Reads prefer serving a default over failing: a missing row, a row that
//! no longer parses, and an unreachable database all resolve to the name's
//! compiled default. Only names without a default can fail, and the
//! [`Resolved`] result says which path was taken.

use std::sync::Arc;

use envoy_core::error::CoreError;
use envoy_core::settings::{
    default_setting, is_known_setting, unknown_setting, FallbackReason, Resolved, KNOWN_SETTINGS,
};
use serde::Serialize;
use serde_json::Value;

use crate::store::SiteStore;

/// Source summary for one known setting, for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct SettingSummary {
    pub name: &'static str,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

#[derive(Clone)]
pub struct SettingsStore {
    store: Arc<dyn SiteStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self { store }
    }

    /// Resolve `name` to its stored value or compiled default.
    ///
    /// Errors only when `name` has no compiled default and:
    /// - no row exists → [`CoreError::UnknownSetting`]
    /// - the row is not valid JSON → [`CoreError::Validation`]
    /// - the database failed → [`CoreError::Unavailable`]
    pub async fn resolve(&self, name: &str) -> Result<Resolved, CoreError> {
        let fallback = |reason| {
            default_setting(name).map(|value| Resolved::Default { value, reason })
        };

        match self.store.setting_value(name).await {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => Ok(Resolved::Stored(value)),
                Err(e) => {
                    tracing::warn!(setting = name, error = %e, "Stored setting is not valid JSON");
                    fallback(FallbackReason::Malformed).ok_or_else(|| {
                        CoreError::Validation(format!("Setting '{name}' holds invalid JSON: {e}"))
                    })
                }
            },
            Ok(None) => fallback(FallbackReason::Missing).ok_or_else(|| unknown_setting(name)),
            Err(e) => {
                tracing::warn!(setting = name, error = %e, "Settings lookup failed");
                fallback(FallbackReason::Unavailable).ok_or_else(|| {
                    CoreError::Unavailable(format!("Failed to load setting '{name}': {e}"))
                })
            }
        }
    }

    /// The value of `name`, stored or default.
    pub async fn get(&self, name: &str) -> Result<Value, CoreError> {
        self.resolve(name).await.map(Resolved::into_value)
    }

    /// Replace the whole document stored under a known setting name.
    pub async fn set(&self, name: &str, value: &Value) -> Result<(), CoreError> {
        if !is_known_setting(name) {
            return Err(unknown_setting(name));
        }
        let raw = value.to_string();
        self.store.save_setting(name, &raw).await.map_err(|e| {
            CoreError::Unavailable(format!("Failed to save setting '{name}': {e}"))
        })?;
        tracing::info!(setting = name, bytes = raw.len(), "Setting saved");
        Ok(())
    }

    /// Insert the compiled default for every known setting without a row.
    ///
    /// Idempotent: rows that already exist are left alone, so a second run
    /// inserts nothing. Returns the number of rows inserted.
    pub async fn seed_defaults(&self) -> Result<usize, sqlx::Error> {
        let mut inserted = 0;
        for &name in KNOWN_SETTINGS {
            let Some(value) = default_setting(name) else {
                continue;
            };
            if self
                .store
                .insert_setting_if_absent(name, &value.to_string())
                .await?
            {
                tracing::info!(setting = name, "Seeded default setting");
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Source of every known setting.
    pub async fn overview(&self) -> Vec<SettingSummary> {
        let mut summaries = Vec::with_capacity(KNOWN_SETTINGS.len());
        for &name in KNOWN_SETTINGS {
            let (source, fallback) = match self.resolve(name).await {
                Ok(resolved) => (resolved.source(), resolved.fallback_reason()),
                Err(_) => ("default", Some(FallbackReason::Unavailable)),
            };
            summaries.push(SettingSummary {
                name,
                source,
                fallback,
            });
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn settings() -> (SettingsStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SettingsStore::new(store.clone()), store)
    }

    #[tokio::test]
    async fn known_names_never_fail() {
        let (settings, store) = settings();
        for name in KNOWN_SETTINGS {
            settings.get(name).await.expect("missing row falls back");
        }
        store.set_available(false);
        for name in KNOWN_SETTINGS {
            settings.get(name).await.expect("outage falls back");
        }
    }

    #[tokio::test]
    async fn stored_value_wins() {
        let (settings, store) = settings();
        store.put_raw_setting("hero", r#"{"title":"Custom"}"#).await;
        assert_eq!(
            settings.resolve("hero").await.unwrap(),
            Resolved::Stored(json!({"title": "Custom"}))
        );
    }

    #[tokio::test]
    async fn missing_row_uses_default() {
        let (settings, _) = settings();
        let resolved = settings.resolve("footer").await.unwrap();
        assert_eq!(resolved.fallback_reason(), Some(FallbackReason::Missing));
        assert_eq!(resolved.value(), &default_setting("footer").unwrap());
    }

    #[tokio::test]
    async fn malformed_row_uses_default() {
        let (settings, store) = settings();
        store.put_raw_setting("faq", "{broken").await;
        let resolved = settings.resolve("faq").await.unwrap();
        assert_eq!(resolved.fallback_reason(), Some(FallbackReason::Malformed));
    }

    #[tokio::test]
    async fn outage_uses_default() {
        let (settings, store) = settings();
        store.set_available(false);
        let resolved = settings.resolve("contact").await.unwrap();
        assert_eq!(resolved.fallback_reason(), Some(FallbackReason::Unavailable));
    }

    #[tokio::test]
    async fn unknown_name_lists_known_names() {
        let (settings, _) = settings();
        assert_matches!(
            settings.get("sidebar").await,
            Err(CoreError::UnknownSetting { known, .. }) if known == KNOWN_SETTINGS
        );
    }

    #[tokio::test]
    async fn unknown_name_with_row_is_served() {
        let (settings, store) = settings();
        store.put_raw_setting("banner", r#"{"on":true}"#).await;
        assert_eq!(settings.get("banner").await.unwrap(), json!({"on": true}));
    }

    #[tokio::test]
    async fn unknown_name_during_outage_is_unavailable() {
        let (settings, store) = settings();
        store.set_available(false);
        assert_matches!(settings.get("sidebar").await, Err(CoreError::Unavailable(msg)) if msg.contains("sidebar"));
    }

    #[tokio::test]
    async fn set_replaces_whole_document() {
        let (settings, _) = settings();
        settings.set("hero", &json!({"title": "A", "subtitle": "B"})).await.unwrap();
        settings.set("hero", &json!({"title": "C"})).await.unwrap();
        assert_eq!(settings.get("hero").await.unwrap(), json!({"title": "C"}));
    }

    #[tokio::test]
    async fn set_rejects_unknown_name() {
        let (settings, _) = settings();
        assert_matches!(
            settings.set("sidebar", &json!({})).await,
            Err(CoreError::UnknownSetting { .. })
        );
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let (settings, store) = settings();
        store.put_raw_setting("hero", r#"{"title":"Keep me"}"#).await;

        let first = settings.seed_defaults().await.unwrap();
        assert_eq!(first, KNOWN_SETTINGS.len() - 1);
        assert_eq!(settings.seed_defaults().await.unwrap(), 0);

        assert_eq!(settings.get("hero").await.unwrap(), json!({"title": "Keep me"}));
        assert!(!settings.resolve("faq").await.unwrap().is_default());
    }

    #[tokio::test]
    async fn overview_reports_sources() {
        let (settings, store) = settings();
        store.put_raw_setting("hero", "{}").await;
        let overview = settings.overview().await;
        assert_eq!(overview.len(), KNOWN_SETTINGS.len());
        let hero = overview.iter().find(|s| s.name == "hero").unwrap();
        assert_eq!(hero.source, "stored");
        let faq = overview.iter().find(|s| s.name == "faq").unwrap();
        assert_eq!(faq.fallback, Some(FallbackReason::Missing));
    }
}
