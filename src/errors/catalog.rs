//! Static registry of every API error code the service knows about.
//!
//! The catalog is the source of truth for the HTTP status and display name of
//! each code. Its entries are written to the `errors` table once at startup;
//! afterwards each occurrence of an error upserts its own row.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::ErrorRecord;

pub const FAILED_DECODE: &str = "FAILED_DECODE";
pub const WRONG_CONFIRM_PASSWORD: &str = "WRONG_CONFIRM_PASSWORD";
pub const INVALID_DATA: &str = "INVALID_DATA";
pub const INVALID_FILTER_VALUE: &str = "INVALID_FILTER_VALUE";
pub const FAILED_LOGIN: &str = "FAILED_LOGIN";
pub const EXPIRED_TOKEN: &str = "EXPIRED_TOKEN";
pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const TOKEN_IS_MISSING: &str = "TOKEN_IS_MISSING";
pub const WRONG_PASSWORD: &str = "WRONG_PASSWORD";
pub const REQUESTER_NOT_IDENTIFIED: &str = "REQUESTER_NOT_IDENTIFIED";
pub const USER_ALREADY_ACCESSED: &str = "USER_ALREADY_ACCESSED";
pub const DEACTIVATE_FORBIDDEN: &str = "DEACTIVATE_FORBIDDEN";
pub const PROFILE_FORBIDDEN_ACCESS: &str = "PROFILE_FORBIDDEN_ACCESS";
pub const DECODED_USER_NOT_FOUND: &str = "DECODED_USER_NOT_FOUND";
pub const EMAIL_NOT_FOUND: &str = "EMAIL_NOT_FOUND";
pub const PAGES_NOT_FOUND: &str = "PAGES_NOT_FOUND";
pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
pub const PAGE_NOT_FOUND: &str = "PAGE_NOT_FOUND";
pub const ERROR_CODE_NOT_FOUND: &str = "ERROR_CODE_NOT_FOUND";
pub const INVALID_CPF: &str = "INVALID_CPF";
pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
pub const USER_IS_ACTIVE: &str = "USER_IS_ACTIVE";
pub const USER_ALREADY_ACTIVE: &str = "USER_ALREADY_ACTIVE";
pub const WRONG_NEW_PASSWORD: &str = "WRONG_NEW_PASSWORD";

/// One known API error: its stable code, HTTP status, name and default description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub api_code: &'static str,
    pub code: u16,
    pub name: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    const fn new(
        api_code: &'static str,
        code: u16,
        name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            api_code,
            code,
            name,
            description,
        }
    }

    /// HTTP status of this entry
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Record seeded into the `errors` table for this entry
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord {
            code: self.code,
            api_code: self.api_code.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            info: None,
        }
    }
}

/// Raised when a code is looked up that the catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown API error code: {0}")]
pub struct UnknownErrorCode(pub String);

static ERROR_CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new(FAILED_DECODE, 400, "Bad Request", "Invalid token to decode. Maybe expired"),
    CatalogEntry::new(WRONG_CONFIRM_PASSWORD, 400, "Bad Request", "Password doesn't match"),
    CatalogEntry::new(INVALID_DATA, 400, "Bad Request", "Invalid Data."),
    CatalogEntry::new(INVALID_FILTER_VALUE, 400, "Bad Request", "Invalid filter value."),
    CatalogEntry::new(FAILED_LOGIN, 401, "Unauthorized", "Incorrect User or Password"),
    CatalogEntry::new(EXPIRED_TOKEN, 401, "Unauthorized", "Expired login token"),
    CatalogEntry::new(INVALID_TOKEN, 401, "Unauthorized", "Invalid login Token"),
    CatalogEntry::new(TOKEN_IS_MISSING, 401, "Unauthorized", "Token is missing."),
    CatalogEntry::new(WRONG_PASSWORD, 401, "Unauthorized", "Invalid password"),
    CatalogEntry::new(
        REQUESTER_NOT_IDENTIFIED,
        401,
        "Unauthorized",
        "Requester identity is missing or malformed.",
    ),
    CatalogEntry::new(
        USER_ALREADY_ACCESSED,
        403,
        "Forbidden",
        "User has already logged in for the first time",
    ),
    CatalogEntry::new(DEACTIVATE_FORBIDDEN, 403, "Forbidden", "Can't deactivate user."),
    CatalogEntry::new(PROFILE_FORBIDDEN_ACCESS, 403, "Forbidden", "User cannot access"),
    CatalogEntry::new(
        DECODED_USER_NOT_FOUND,
        404,
        "Not Found",
        "Decoded token does not refer to a user",
    ),
    CatalogEntry::new(EMAIL_NOT_FOUND, 404, "Not Found", "User with this email doesn't exist!"),
    CatalogEntry::new(PAGES_NOT_FOUND, 404, "Not Found", "No page generated"),
    CatalogEntry::new(USER_NOT_FOUND, 404, "Not Found", "User doesn't exist."),
    CatalogEntry::new(PAGE_NOT_FOUND, 404, "Not Found", "Page doesn't exist."),
    CatalogEntry::new(ERROR_CODE_NOT_FOUND, 404, "Not Found", "Error code doesn't exist."),
    CatalogEntry::new(INVALID_CPF, 406, "Not Acceptable", "The CPF provided is not valid."),
    CatalogEntry::new(USER_ALREADY_EXISTS, 409, "Conflict", "User already exists"),
    CatalogEntry::new(USER_IS_ACTIVE, 409, "Conflict", "User is already active"),
    CatalogEntry::new(USER_ALREADY_ACTIVE, 409, "Conflict", "User already exists and is active."),
    CatalogEntry::new(
        WRONG_NEW_PASSWORD,
        422,
        "Unprocessable Entity",
        "New password cannot be the same as the current one",
    ),
];

/// Every catalog entry, in seeding order.
pub fn entries() -> &'static [CatalogEntry] {
    ERROR_CATALOG
}

/// Find the catalog entry for `api_code`.
pub fn lookup(api_code: &str) -> Result<&'static CatalogEntry, UnknownErrorCode> {
    ERROR_CATALOG
        .iter()
        .find(|entry| entry.api_code == api_code)
        .ok_or_else(|| UnknownErrorCode(api_code.to_string()))
}
