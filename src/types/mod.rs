//! Shared types for list and write endpoints.

mod filter;
mod pagination;
mod response;

pub use filter::{
    FieldFormat, FilterField, FilterSpec, FilterValue, CPF_PATTERN, ERROR_FILTERS, USER_FILTERS,
};
pub use pagination::{
    total_pages, ErrorPage, Paginated, PaginationMeta, PaginationParams, UserPage,
};
pub use response::{Created, NoContent};
