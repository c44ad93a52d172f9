//! Roadblock response DTOs

use serde::Serialize;

/// Success envelope: `{ "success": true, "data": ... }`
///
/// `data` is always present; an empty selection serializes as `null`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Delete acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl Default for DeleteResponse {
    fn default() -> Self {
        Self {
            success: true,
            message: "Roadblock deleted successfully".to_string(),
        }
    }
}
