use std::sync::Arc;

use crate::auth::{AdminAccount, Role};
use crate::models::ServiceError;
use crate::repositories::{SheetError, SheetRepository};

pub struct AuthService {
    repository: Arc<dyn SheetRepository>,
    admin: AdminAccount,
}

impl AuthService {
    pub fn new(repository: Arc<dyn SheetRepository>, admin: AdminAccount) -> Self {
        Self { repository, admin }
    }

    pub fn is_configured(&self) -> bool {
        self.repository.is_configured()
    }

    /// The administrator is checked locally; everybody else, including a
    /// failed administrator attempt, is checked by the sheet service.
    pub async fn login(&self, username: &str, password: &str) -> Result<Role, ServiceError> {
        if self.admin.verify(username, password) {
            tracing::info!(username, "Administrator logged in");
            return Ok(Role::Admin);
        }

        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationError(
                "Registration number and password are required".to_string(),
            ));
        }

        match self.repository.authenticate_user(username, password).await {
            Ok(()) => {
                tracing::info!(username, "User logged in");
                Ok(Role::User)
            }
            Err(SheetError::Remote(message)) => match ServiceError::from_remote_message(message) {
                ServiceError::RemoteError(message) => {
                    tracing::info!(username, "Login rejected: {}", message);
                    Err(ServiceError::AuthenticationError(message))
                }
                other => Err(other),
            },
            Err(e) => Err(e.into()),
        }
    }
}
