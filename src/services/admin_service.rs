use std::sync::Arc;

use crate::models::{AdminView, CredentialRecord, ServiceError, SortSpec};
use crate::repositories::SheetRepository;
use crate::services::admin_view::build_view;

pub const ALL_STATS_ZERO_WARNING: &str = "Warning: every user's statistics (query count, last login) look zero or default. \
This usually means the registration numbers in the 'Kullanıcılar', 'SorguLogları' and 'LoginLog' sheets do not match exactly. \
Make sure they use the same format on every sheet (for example plain text without spaces).";

pub struct AdminService {
    repository: Arc<dyn SheetRepository>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn SheetRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self, sort: SortSpec, search: &str) -> Result<AdminView, ServiceError> {
        let (credentials, activity) = tokio::try_join!(
            self.repository.get_credentials(),
            self.repository.get_user_activity_stats()
        )?;

        let view = build_view(&credentials, &activity, sort, search);
        if view.all_stats_zero {
            tracing::warn!(
                users = view.total,
                "All user statistics are default; credential and log sheets may not be joining"
            );
        }

        Ok(view)
    }

    pub async fn add_user(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        let credential = Self::validated(username, password, "Registration number and password cannot be empty.")?;

        self.repository.add_credential(&credential).await?;

        tracing::info!(username = %credential.username, "Added credential");
        Ok(format!("User {} added successfully", credential.username))
    }

    pub async fn delete_user(&self, username: &str) -> Result<String, ServiceError> {
        if username.is_empty() {
            return Err(ServiceError::ValidationError(
                "Registration number is required".to_string(),
            ));
        }

        self.repository.delete_credential(username).await?;

        tracing::info!(username, "Deleted credential");
        Ok(format!("User {} deleted successfully", username))
    }

    pub async fn update_user(
        &self,
        original_username: &str,
        username: &str,
        password: &str,
    ) -> Result<String, ServiceError> {
        if original_username.is_empty() {
            return Err(ServiceError::ValidationError(
                "Original registration number is required".to_string(),
            ));
        }
        let credential = Self::validated(username, password, "Fields cannot be empty.")?;

        self.repository
            .update_credential(original_username, &credential)
            .await?;

        tracing::info!(
            original_username,
            username = %credential.username,
            "Updated credential"
        );
        Ok(format!("User {} updated successfully", credential.username))
    }

    fn validated(username: &str, password: &str, message: &str) -> Result<CredentialRecord, ServiceError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationError(message.to_string()));
        }
        Ok(CredentialRecord::new(username, password))
    }
}
