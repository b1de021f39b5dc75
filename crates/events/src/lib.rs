//! Trojan Envoy change-notification bus.
//!
//! Record-store and settings mutations are announced on an [`EventBus`] so
//! that interested parts of the site (admin views, caches, audit logging)
//! can resync:
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SiteEvent`]: the typed event enum, one variant per collection.
//! - [`TopicReceiver`]: a subscription filtered to a single [`Topic`].

pub mod bus;
pub mod event;

pub use bus::{EventBus, TopicReceiver};
pub use event::{Change, SiteEvent, Topic};
