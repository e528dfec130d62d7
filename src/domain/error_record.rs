//! Persisted description of an API error code.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Error record as stored in the `errors` table and returned to clients.
///
/// `info` is per-occurrence detail; it travels with responses but is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRecord {
    /// HTTP status code
    #[schema(example = 404)]
    pub code: u16,
    /// Stable machine-readable code
    #[schema(example = "USER_NOT_FOUND")]
    pub api_code: String,
    #[schema(example = "Not Found")]
    pub name: String,
    #[schema(example = "User doesn't exist.")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub info: Option<Value>,
}
