//! Report Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::project::ProjectRef;
use super::user::UserRef;

/// A raw string that is not the name of any member of a report enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `as_str`, `ALL`, `Display` and a case-sensitive `FromStr`
/// that accepts exactly the member names.
macro_rules! report_enum_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

/// Report lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "report_status", rename_all = "snake_case")
)]
pub enum ReportStatus {
    Reported,
    Escalated,
    Confirmed,
    Paid,
    Closed,
}

report_enum_names!(ReportStatus, "status", {
    Reported => "reported",
    Escalated => "escalated",
    Confirmed => "confirmed",
    Paid => "paid",
    Closed => "closed",
});

/// Report urgency classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "report_severity", rename_all = "snake_case")
)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    None,
}

report_enum_names!(Severity, "severity", {
    Critical => "critical",
    High => "high",
    Medium => "medium",
    Low => "low",
    None => "none",
});

/// Asset class the report targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "report_type", rename_all = "snake_case")
)]
pub enum ReportType {
    BlockchainDlt,
    SmartContract,
    WebsitesAndApplications,
}

report_enum_names!(ReportType, "type", {
    BlockchainDlt => "blockchain_dlt",
    SmartContract => "smart_contract",
    WebsitesAndApplications => "websites_and_applications",
});

/// List projection of a report: scalar fields plus its project and
/// submitting user. Foreign-key columns and the description are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedReport {
    pub id: i64,
    pub status: ReportStatus,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub title: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    pub project: ProjectRef,
    pub user: UserRef,
}

/// Full report as returned by the single-report endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetail {
    pub id: i64,
    pub status: ReportStatus,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub title: String,
    pub description: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    pub project_id: i64,
    pub user_id: i64,
    pub project: ProjectRef,
    pub user: UserRef,
}
