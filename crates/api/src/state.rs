use std::sync::Arc;

use envoy_db::{SettingsStore, SiteStore};
use envoy_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Data access: MySQL in production, in-memory in tests.
    pub store: Arc<dyn SiteStore>,
    /// Named settings with compiled defaults, backed by `store`.
    pub settings: SettingsStore,
    pub config: Arc<ServerConfig>,
    /// Publishes site change events (setting saves).
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>, config: ServerConfig, event_bus: Arc<EventBus>) -> Self {
        Self {
            settings: SettingsStore::new(Arc::clone(&store)),
            store,
            config: Arc::new(config),
            event_bus,
        }
    }
}
