//! Shared response envelope for API handlers.
//!
//! Every response body carries a `success` flag. Successful responses put
//! their payload under `data`; failures (see [`crate::error::AppError`])
//! carry `error` and `code` instead.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(entries)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
