use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::NO_LOGIN_SENTINEL;

/// Column the admin user table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Username,
    QueryCount,
    LastLogin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::QueryCount,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort order after the user clicks the `key` column header: the active column
    /// flips from ascending to descending, anything else starts ascending.
    pub fn request(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }
}

/// A credential joined with its activity statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergedUserRow {
    pub username: String,
    pub password: String,
    pub query_count: u64,
    pub last_login: String,
}

impl MergedUserRow {
    pub fn has_no_activity(&self) -> bool {
        self.query_count == 0 && self.last_login == NO_LOGIN_SENTINEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminView {
    pub rows: Vec<MergedUserRow>,
    /// Size of the merged set before filtering; always the credential count.
    pub total: usize,
    /// Every merged row carries default statistics; the two sheets most
    /// likely do not join on their registration numbers.
    pub all_stats_zero: bool,
}
