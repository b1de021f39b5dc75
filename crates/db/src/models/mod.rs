//! Row structs and query filters.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus any filter type its repository accepts.

pub mod content;
pub mod navigation;
pub mod setting;
pub mod user;
