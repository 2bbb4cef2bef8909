//! Report filter predicate
//!
//! Built once per listing request from [`ReportFilters`]. The same value
//! renders the `WHERE` clause and binds the parameters for both the count
//! query and the page query, so the two can never disagree.

use shared::models::{ReportStatus, ReportType, Severity};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};

use crate::filter::{ReportFilters, SortDirection, SortField};

/// Joined row source shared by every report listing query
pub const REPORTS_FROM: &str = "FROM reports r \
     INNER JOIN projects p ON p.id = r.project_id \
     INNER JOIN users u ON u.id = r.user_id";

#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Status(ReportStatus),
    Severity(Severity),
    Type(ReportType),
}

/// Dynamic `WHERE` conditions with positional (`$n`) bindings
#[derive(Debug, Clone, Default)]
pub struct ReportPredicate {
    conditions: Vec<String>,
    bindings: Vec<QueryValue>,
}

impl ReportPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicate for a normalized filter set. Absent filters add nothing.
    pub fn from_filters(filters: &ReportFilters) -> Self {
        let mut predicate = Self::new();

        if let Some(id) = filters.report_id {
            predicate.add_eq("r.id", QueryValue::Integer(id));
        }
        if let Some(project) = &filters.project {
            predicate.add_search_condition(&["p.name"], project);
        }
        if let Some(hacker) = &filters.hacker {
            predicate.add_search_condition(&["u.username", "u.email"], hacker);
        }
        if let Some(status) = filters.status {
            predicate.add_eq("r.status", QueryValue::Status(status));
        }
        if let Some(severity) = filters.severity {
            predicate.add_eq("r.severity", QueryValue::Severity(severity));
        }
        if let Some(report_type) = filters.report_type {
            predicate.add_eq("r.\"type\"", QueryValue::Type(report_type));
        }

        predicate
    }

    fn bind(&mut self, value: QueryValue) -> String {
        self.bindings.push(value);
        format!("${}", self.bindings.len())
    }

    /// Add an equality condition
    pub fn add_eq(&mut self, column: &str, value: QueryValue) -> &mut Self {
        let placeholder = self.bind(value);
        self.conditions.push(format!("{column} = {placeholder}"));
        self
    }

    /// Add a case-insensitive substring match over one or more columns,
    /// OR-ed together. The search text is matched literally.
    pub fn add_search_condition(&mut self, columns: &[&str], search: &str) -> &mut Self {
        let placeholder = self.bind(QueryValue::Text(contains_pattern(search)));
        let field_conditions: Vec<String> = columns
            .iter()
            .map(|column| format!("{column} ILIKE {placeholder}"))
            .collect();

        self.conditions
            .push(format!("({})", field_conditions.join(" OR ")));
        self
    }

    /// Build WHERE clause (empty if no conditions)
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Number of bound parameters; further placeholders start after it.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn bindings(&self) -> &[QueryValue] {
        &self.bindings
    }

    /// Apply bindings to a row query
    pub fn apply_bindings<'a, O>(
        &'a self,
        mut query: QueryAs<'a, Postgres, O, PgArguments>,
    ) -> QueryAs<'a, Postgres, O, PgArguments> {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s),
                QueryValue::Integer(i) => query.bind(*i),
                QueryValue::Status(v) => query.bind(*v),
                QueryValue::Severity(v) => query.bind(*v),
                QueryValue::Type(v) => query.bind(*v),
            };
        }
        query
    }

    /// Apply bindings to a scalar query (the count)
    pub fn apply_bindings_scalar<'a, O>(
        &'a self,
        mut query: QueryScalar<'a, Postgres, O, PgArguments>,
    ) -> QueryScalar<'a, Postgres, O, PgArguments> {
        for binding in &self.bindings {
            query = match binding {
                QueryValue::Text(s) => query.bind(s),
                QueryValue::Integer(i) => query.bind(*i),
                QueryValue::Status(v) => query.bind(*v),
                QueryValue::Severity(v) => query.bind(*v),
                QueryValue::Type(v) => query.bind(*v),
            };
        }
        query
    }
}

/// `ILIKE` pattern matching `search` anywhere, with wildcards escaped
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl SortField {
    /// Column the sort key maps to; `user` and `project` go through the joins.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "r.id",
            SortField::Status => "r.status",
            SortField::Severity => "r.severity",
            SortField::Type => "r.\"type\"",
            SortField::Title => "r.title",
            SortField::CreatedAt => "r.created_at",
            SortField::User => "u.username",
            SortField::Project => "p.name",
        }
    }
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// `ORDER BY` clause with `r.id` as the tie-breaker
pub fn order_by_clause(field: SortField, direction: SortDirection) -> String {
    let dir = direction.keyword();
    match field {
        SortField::Id => format!(" ORDER BY r.id {dir}"),
        _ => format!(" ORDER BY {} {dir}, r.id {dir}", field.column()),
    }
}
