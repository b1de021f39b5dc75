//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&MySqlPool` as the first argument.

pub mod content_repo;
pub mod navigation_repo;
pub mod setting_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use navigation_repo::NavigationRepo;
pub use setting_repo::SettingRepo;
pub use user_repo::UserRepo;
