//! Domain types shared by the Trojan Envoy content service.

pub mod error;
pub mod navigation;
pub mod records;
pub mod settings;
pub mod slug;
pub mod types;
