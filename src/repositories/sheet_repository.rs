use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::is_script_url_configured;
use crate::models::{lenient, ActivityRecord, CredentialRecord, Customer};

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet service URL is not configured")]
    NotConfigured,
    #[error("invalid sheet service URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("network error: {0}")]
    Status(String),
    #[error("{0}")]
    Remote(String),
    #[error("unexpected response from sheet service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The spreadsheet-backed store holding credentials, customers and logs.
#[async_trait]
pub trait SheetRepository: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn authenticate_user(&self, username: &str, password: &str) -> Result<(), SheetError>;
    async fn get_credentials(&self) -> Result<Vec<CredentialRecord>, SheetError>;
    async fn get_user_activity_stats(&self) -> Result<Vec<ActivityRecord>, SheetError>;
    async fn add_credential(
        &self,
        credential: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError>;
    async fn delete_credential(&self, username: &str) -> Result<Vec<CredentialRecord>, SheetError>;
    async fn update_credential(
        &self,
        original_username: &str,
        updated: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError>;
    async fn find_customer(&self, installation_number: &str) -> Result<Option<Customer>, SheetError>;
    async fn log_search(&self, username: &str, installation_number: &str) -> Result<(), SheetError>;
    async fn get_districts(&self) -> Result<Vec<String>, SheetError>;
}

#[derive(Deserialize)]
struct CredentialsPayload {
    #[serde(default)]
    credentials: Vec<CredentialRecord>,
}

#[derive(Deserialize)]
struct StatsPayload {
    #[serde(default)]
    stats: Vec<ActivityRecord>,
}

#[derive(Deserialize)]
struct CustomerPayload {
    #[serde(default)]
    customer: Option<Customer>,
}

#[derive(Deserialize)]
struct DistrictsPayload {
    #[serde(default, deserialize_with = "lenient::string_list")]
    districts: Vec<String>,
}

/// Unwraps the `{ "success": bool, "error"?: string, ... }` envelope every
/// script action answers with, then decodes the payload fields.
pub fn parse_envelope<T: DeserializeOwned>(value: Value) -> Result<T, SheetError> {
    let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or("Unknown server error");
        return Err(SheetError::Remote(message.to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

pub struct HttpSheetRepository {
    client: reqwest::Client,
    script_url: Option<Url>,
}

impl HttpSheetRepository {
    pub fn new(script_url: Option<&str>, timeout: Duration) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let script_url = match script_url {
            Some(url) if is_script_url_configured(url) => {
                Some(Url::parse(url.trim()).map_err(|e| SheetError::InvalidUrl(e.to_string()))?)
            }
            _ => None,
        };

        Ok(Self { client, script_url })
    }

    fn script_url(&self) -> Result<&Url, SheetError> {
        self.script_url.as_ref().ok_or(SheetError::NotConfigured)
    }

    async fn get_action<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SheetError> {
        let url = self.script_url()?;
        tracing::debug!(action, "Sheet service GET");

        let response = self
            .client
            .get(url.clone())
            .query(&[("action", action)])
            .query(params)
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    async fn post_action<T: DeserializeOwned>(
        &self,
        action: &str,
        data: Value,
    ) -> Result<T, SheetError> {
        let url = self.script_url()?;
        tracing::debug!(action, "Sheet service POST");

        // The script only accepts simple requests, so JSON goes out as text/plain
        let body = serde_json::to_string(&json!({ "action": action, "data": data }))?;
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SheetError> {
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(SheetError::Status(reason.to_string()));
        }

        let value: Value = response.json().await?;
        parse_envelope(value)
    }
}

#[async_trait]
impl SheetRepository for HttpSheetRepository {
    fn is_configured(&self) -> bool {
        self.script_url.is_some()
    }

    async fn authenticate_user(&self, username: &str, password: &str) -> Result<(), SheetError> {
        self.post_action::<IgnoredAny>(
            "authenticateUser",
            json!({ "username": username, "password": password }),
        )
        .await?;
        Ok(())
    }

    async fn get_credentials(&self) -> Result<Vec<CredentialRecord>, SheetError> {
        let payload: CredentialsPayload = self.get_action("getCredentials", &[]).await?;
        Ok(payload.credentials)
    }

    async fn get_user_activity_stats(&self) -> Result<Vec<ActivityRecord>, SheetError> {
        let payload: StatsPayload = self.get_action("getUserActivityStats", &[]).await?;
        Ok(payload.stats)
    }

    async fn add_credential(
        &self,
        credential: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError> {
        let payload: CredentialsPayload = self.post_action("add", json!(credential)).await?;
        Ok(payload.credentials)
    }

    async fn delete_credential(&self, username: &str) -> Result<Vec<CredentialRecord>, SheetError> {
        let payload: CredentialsPayload = self
            .post_action("delete", json!({ "username": username }))
            .await?;
        Ok(payload.credentials)
    }

    async fn update_credential(
        &self,
        original_username: &str,
        updated: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError> {
        let payload: CredentialsPayload = self
            .post_action(
                "update",
                json!({ "originalUsername": original_username, "updatedCredential": updated }),
            )
            .await?;
        Ok(payload.credentials)
    }

    async fn find_customer(&self, installation_number: &str) -> Result<Option<Customer>, SheetError> {
        let payload: CustomerPayload = self
            .get_action("findCustomer", &[("installationNumber", installation_number)])
            .await?;
        Ok(payload.customer)
    }

    async fn log_search(&self, username: &str, installation_number: &str) -> Result<(), SheetError> {
        self.post_action::<IgnoredAny>(
            "logSearch",
            json!({ "username": username, "installationNumber": installation_number }),
        )
        .await?;
        Ok(())
    }

    async fn get_districts(&self) -> Result<Vec<String>, SheetError> {
        let payload: DistrictsPayload = self.get_action("getDistricts", &[]).await?;
        Ok(payload.districts)
    }
}
