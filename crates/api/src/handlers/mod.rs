pub mod content;
pub mod health;
pub mod navigation;
pub mod settings;
pub mod users;
