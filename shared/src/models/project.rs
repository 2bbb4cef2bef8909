//! Project Model

use serde::{Deserialize, Serialize};

/// Project as embedded in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,
    pub name: String,
}
