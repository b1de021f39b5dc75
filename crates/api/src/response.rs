//! Shared response envelope types for API handlers.
//!
//! List and record endpoints wrap their payload in `{ "data": ... }`.
//! Setting documents are returned bare because site clients consume them
//! directly as configuration.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
