//! Report filter normalization
//!
//! Turns raw query-string parameters into a [`ReportFilters`] descriptor.
//! Nothing here fails: unparseable or unknown values are dropped (filters)
//! or replaced by their defaults (sorting and paging).

use std::collections::HashMap;
use std::str::FromStr;

use shared::models::{ReportStatus, ReportType, Severity, UnknownVariant};
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A filter value that was discarded during normalization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidFilterValue { field: &'static str, value: String },
}

impl FilterError {
    fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidFilterValue {
            field,
            value: value.to_string(),
        }
    }
}

impl From<UnknownVariant> for FilterError {
    fn from(e: UnknownVariant) -> Self {
        Self::InvalidFilterValue {
            field: e.kind,
            value: e.value,
        }
    }
}

/// Sort key accepted in the `field` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Status,
    Severity,
    Type,
    Title,
    #[default]
    CreatedAt,
    /// Submitting user's username
    User,
    /// Project name
    Project,
}

impl FromStr for SortField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "status" => Ok(Self::Status),
            "severity" => Ok(Self::Severity),
            "type" => Ok(Self::Type),
            "title" => Ok(Self::Title),
            "createdAt" => Ok(Self::CreatedAt),
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            _ => Err(FilterError::invalid("field", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(FilterError::invalid("sort", s)),
        }
    }
}

/// Normalized filter/sort/page descriptor for one listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilters {
    pub report_id: Option<i64>,
    pub status: Option<ReportStatus>,
    pub severity: Option<Severity>,
    pub report_type: Option<ReportType>,
    /// Case-insensitive substring of the project name
    pub project: Option<String>,
    /// Case-insensitive substring of the user's username or email
    pub hacker: Option<String>,
    pub field: SortField,
    pub sort: SortDirection,
    /// Zero-based page index
    pub page: u32,
    pub page_size: u32,
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self {
            report_id: None,
            status: None,
            severity: None,
            report_type: None,
            project: None,
            hacker: None,
            field: SortField::default(),
            sort: SortDirection::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ReportFilters {
    /// Build a descriptor from raw query parameters, substituting defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str);

        Self {
            report_id: get("reportId").and_then(parse_id),
            status: get("status").and_then(|raw| accept("status", raw)),
            severity: get("severity").and_then(|raw| accept("severity", raw)),
            report_type: get("type").and_then(|raw| accept("type", raw)),
            project: non_empty(get("project")),
            hacker: non_empty(get("hacker")),
            field: get("field")
                .and_then(|raw| accept("field", raw))
                .unwrap_or_default(),
            sort: get("sort")
                .and_then(|raw| accept("sort", raw))
                .unwrap_or_default(),
            page: get("page").and_then(parse_number).map_or(0, page_index),
            page_size: get("pageSize")
                .and_then(parse_number)
                .map_or(DEFAULT_PAGE_SIZE, page_size),
        }
    }

    /// Number of rows to skip before the current page
    pub fn skip(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// Parse an enum-like value, logging and discarding anything unknown.
fn accept<T>(key: &'static str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Into<FilterError>,
{
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            let e: FilterError = e.into();
            tracing::debug!(param = key, error = %e, "Discarding filter value");
            None
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

fn page_index(n: f64) -> u32 {
    if n.is_finite() && n >= 1.0 {
        n.trunc() as u32
    } else {
        0
    }
}

fn page_size(n: f64) -> u32 {
    if n.is_finite() && n >= 1.0 {
        n.trunc() as u32
    } else {
        DEFAULT_PAGE_SIZE
    }
}

fn trim_leading(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Signed leading integer, e.g. `"  -42px"` gives `"-42"`.
fn int_prefix(raw: &str) -> Option<&str> {
    let s = trim_leading(raw);
    let sign = usize::from(s.starts_with(&['+', '-'][..]));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0).then(|| &s[..sign + digits])
}

/// Leading float literal without integer digits: `.5`, `-.5e2`, `Infinity`.
fn float_prefix(raw: &str) -> Option<f64> {
    let s = trim_leading(raw);
    let sign = usize::from(s.starts_with(&['+', '-'][..]));
    let body = &s[sign..];
    let negative = s.starts_with('-');

    if body.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = body.as_bytes();
    if bytes.first() != Some(&b'.') {
        return None;
    }
    let fraction = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if fraction == 0 {
        return None;
    }
    let mut end = 1 + fraction;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = bytes[exp.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..sign + end].parse().ok()
}

/// Permissive numeric parse: a leading integer wins (`"12abc"` is 12,
/// `"1.9"` is 1); otherwise a leading float literal is accepted; otherwise
/// `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    match int_prefix(raw) {
        Some(digits) => digits.parse().ok(),
        None => float_prefix(raw),
    }
}

/// Report ids must denote an integer that fits in `i64`.
fn parse_id(raw: &str) -> Option<i64> {
    let id = match int_prefix(raw) {
        Some(digits) => digits.parse().ok(),
        None => float_prefix(raw)
            .filter(|n| n.is_finite() && n.fract() == 0.0)
            .map(|n| n as i64),
    };
    if id.is_none() {
        tracing::debug!(raw, "Discarding reportId filter");
    }
    id
}
