//! Record types for the CMS collections managed by the record store.
//!
//! Each submodule contains:
//! - a `Serialize` + `Deserialize` record struct (camelCase on the wire)
//! - a `New*` creation payload with `validate()`
//! - a `*Patch` update payload (all `Option` fields) applied by `apply()`

pub mod contact;
pub mod content;
pub mod navigation;
pub mod user;
pub mod waiting_list;

pub use contact::{ContactPatch, ContactRequest, ContactStatus, NewContactRequest};
pub use content::{ContentItem, ContentPatch, ContentStatus, ContentType, NewContent};
pub use navigation::{default_navigation, NavigationItem, NavigationPatch, NewNavigationItem};
pub use user::{NewUser, User, UserPatch, UserRole};
pub use waiting_list::{NewWaitingListEntry, WaitingListEntry, WaitingListPatch};
