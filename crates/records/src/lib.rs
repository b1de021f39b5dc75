//! Record store for the site's CMS collections.
//!
//! Collections (content, navigation, users, contact requests, waiting list)
//! are persisted as JSON arrays through an injectable [`Persistence`]
//! adapter. Every mutation is announced on the shared
//! [`EventBus`](envoy_events::EventBus).
//!
//! - [`RecordStore`]: generic per-collection repository.
//! - [`SiteRecords`]: all collections together, keeping page navigation in
//!   sync with content.
//! - [`MemoryPersistence`] / [`FilePersistence`]: storage adapters.

pub mod error;
pub mod persistence;
pub mod record;
pub mod site;
pub mod store;

pub use error::StoreError;
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};
pub use record::Record;
pub use site::SiteRecords;
pub use store::RecordStore;
