//! Query-string filters for list endpoints.
//!
//! A [`FilterSpec`] is built from the raw query parameters of a request and an
//! allow-list of [`FilterField`]s for the resource being listed. Parameters not
//! on the allow-list are ignored, as are empty values. Each accepted value is
//! checked against its field's [`FieldFormat`] and becomes an equality
//! constraint applied by the paginator.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SEARCH_PARAM;
use crate::errors::ApiError;

/// Eleven digits, the shape of a CPF
pub static CPF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{11}$").expect("valid CPF regex"));

/// How a filter value is checked and typed
#[derive(Debug, Clone, Copy)]
pub enum FieldFormat {
    /// Any non-empty text, compared as a string
    Text,
    /// Text that must match the pattern
    Pattern(&'static Lazy<Regex>),
    /// Base-10 integer
    Integer,
    /// Accepted and kept, but never turned into a constraint
    Reserved,
}

/// A query parameter a resource may be filtered by
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub name: &'static str,
    pub format: FieldFormat,
}

impl FilterField {
    pub const fn new(name: &'static str, format: FieldFormat) -> Self {
        Self { name, format }
    }
}

/// Filters accepted by the user listing
pub static USER_FILTERS: &[FilterField] = &[
    FilterField::new(SEARCH_PARAM, FieldFormat::Reserved),
    FilterField::new("name", FieldFormat::Text),
    FilterField::new("cpf", FieldFormat::Pattern(&CPF_PATTERN)),
    FilterField::new("age", FieldFormat::Text),
];

/// Filters accepted by the error-record listing
pub static ERROR_FILTERS: &[FilterField] = &[
    FilterField::new("api_code", FieldFormat::Text),
    FilterField::new("code", FieldFormat::Integer),
    FilterField::new("name", FieldFormat::Text),
];

/// Typed value of a single constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl From<FilterValue> for sea_orm::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Text(text) => text.into(),
            FilterValue::Integer(n) => n.into(),
        }
    }
}

/// Validated field/value constraints for one listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    constraints: Vec<(&'static str, FilterValue)>,
    search: Option<String>,
}

impl FilterSpec {
    /// Build a filter from query parameters, keeping only allow-listed fields.
    ///
    /// Fails with `INVALID_FILTER_VALUE` when a supplied value does not match
    /// its field's format.
    pub fn from_query(
        query: &HashMap<String, String>,
        allowed: &[FilterField],
    ) -> Result<Self, ApiError> {
        let mut spec = Self::default();

        for field in allowed {
            let raw = match query.get(field.name).map(|v| v.trim()) {
                Some(raw) if !raw.is_empty() => raw,
                _ => continue,
            };

            match field.format {
                FieldFormat::Reserved => spec.search = Some(raw.to_string()),
                FieldFormat::Text => spec.push(field.name, FilterValue::Text(raw.to_string())),
                FieldFormat::Pattern(pattern) => {
                    if !pattern.is_match(raw) {
                        return Err(ApiError::invalid_filter_value(field.name, raw));
                    }
                    spec.push(field.name, FilterValue::Text(raw.to_string()));
                }
                FieldFormat::Integer => {
                    let n = raw
                        .parse::<i64>()
                        .map_err(|_| ApiError::invalid_filter_value(field.name, raw))?;
                    spec.push(field.name, FilterValue::Integer(n));
                }
            }
        }

        tracing::debug!(constraints = ?spec.constraints, "Parsed list filters");
        Ok(spec)
    }

    /// Add an equality constraint
    pub fn with(mut self, field: &'static str, value: FilterValue) -> Self {
        self.push(field, value);
        self
    }

    fn push(&mut self, field: &'static str, value: FilterValue) {
        self.constraints.push((field, value));
    }

    /// Equality constraints, in allow-list order
    pub fn constraints(&self) -> &[(&'static str, FilterValue)] {
        &self.constraints
    }

    /// The reserved free-text term, if one was supplied. Not applied to queries.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unknown_and_empty_params_ignored() {
        let spec =
            FilterSpec::from_query(&query(&[("color", "red"), ("name", "")]), USER_FILTERS).unwrap();
        assert!(spec.is_empty());
        assert!(spec.search().is_none());
    }

    #[test]
    fn test_user_filters_collected() {
        let spec = FilterSpec::from_query(
            &query(&[("name", "Ana"), ("cpf", "52998224725"), ("age", "22")]),
            USER_FILTERS,
        )
        .unwrap();

        assert_eq!(
            spec.constraints(),
            &[
                ("name", FilterValue::Text("Ana".to_string())),
                ("cpf", FilterValue::Text("52998224725".to_string())),
                ("age", FilterValue::Text("22".to_string())),
            ]
        );
    }

    #[test]
    fn test_cpf_pattern_enforced() {
        let err = FilterSpec::from_query(&query(&[("cpf", "123")]), USER_FILTERS).unwrap_err();
        assert_eq!(err.api_code(), "INVALID_FILTER_VALUE");
        assert_eq!(err.info().unwrap()["field"], "cpf");
    }

    #[test]
    fn test_cpf_filter_checks_shape_only() {
        // The checksum belongs to writes; lookups by a malformed-but-shaped CPF just miss.
        let spec = FilterSpec::from_query(&query(&[("cpf", "11111111111")]), USER_FILTERS);
        assert!(spec.is_ok());
    }

    #[test]
    fn test_search_is_kept_but_not_a_constraint() {
        let spec = FilterSpec::from_query(&query(&[("search", "ana")]), USER_FILTERS).unwrap();
        assert_eq!(spec.search(), Some("ana"));
        assert!(spec.is_empty());
    }

    #[test]
    fn test_integer_filter() {
        let spec = FilterSpec::from_query(&query(&[("code", "404")]), ERROR_FILTERS).unwrap();
        assert_eq!(spec.constraints(), &[("code", FilterValue::Integer(404))]);

        let err = FilterSpec::from_query(&query(&[("code", "nope")]), ERROR_FILTERS).unwrap_err();
        assert_eq!(err.api_code(), "INVALID_FILTER_VALUE");
    }
}
