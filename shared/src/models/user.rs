//! User Model
//!
//! The submitting user of a report; filters call this the "hacker".

use serde::{Deserialize, Serialize};

/// User as embedded in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub email: String,
    pub username: String,
}
