use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::lenient;

/// Placeholder `lastLogin` value for users that never logged in. The sheet
/// script emits the same literal, so it is compared by value.
pub const NO_LOGIN_SENTINEL: &str = "Giriş Yapmadı";

fn no_login() -> String {
    NO_LOGIN_SENTINEL.to_string()
}

/// A row of the credentials sheet. `username` is the registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CredentialRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(deserialize_with = "lenient::string")]
    pub password: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Per-user statistics computed by the sheet service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub query_count: u64,
    #[serde(default = "no_login", deserialize_with = "lenient::string")]
    pub last_login: String,
}

impl ActivityRecord {
    pub fn new(
        username: impl Into<String>,
        query_count: u64,
        last_login: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            query_count,
            last_login: last_login.into(),
        }
    }
}

/// A customer installation as stored in the subscribers sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "lenient::string")]
    pub installation_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub longitude: Option<String>,
}
