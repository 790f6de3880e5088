use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::Role;
use crate::models::{Customer, MergedUserRow, SortDirection, SortKey, SortSpec};
use crate::services::Screen;

// =============================================================================
// REQUEST TYPES
// =============================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct CustomerSearchForm {
    pub installation_number: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddUserForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteUserForm {
    pub username: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUserForm {
    pub original_username: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminUsersQuery {
    /// Column to sort by; defaults to `queryCount`
    pub sort_key: Option<SortKey>,
    /// Direction for `sort_key`; defaults to `ascending`
    pub direction: Option<SortDirection>,
    /// Column header clicked by the user, applied on top of the current sort
    pub toggle: Option<SortKey>,
    /// Case-insensitive substring of the registration number
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub show_passwords: bool,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

// Common response types
#[derive(Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

// Authentication responses
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_in: u64, // seconds
    pub role: Role,
    pub legal_accepted: bool,
}

#[derive(Serialize, ToSchema)]
pub struct RememberedUsernameResponse {
    pub success: bool,
    pub username: Option<String>,
}

// Session and availability responses
#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
    pub screen: Screen,
    pub configured: bool,
    pub is_working_time: bool,
    pub username: Option<String>,
    pub role: Option<Role>,
}

#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub open: bool,
    pub message: Option<String>,
}

// Customer lookup responses
#[derive(Serialize, ToSchema)]
pub struct CustomerSearchResponse {
    pub success: bool,
    pub customer: Customer,
    pub map_embed_url: Option<String>,
    pub phone_link: Option<String>,
    pub warning: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DistrictsResponse {
    pub success: bool,
    pub districts: Vec<String>,
}

// Credential administration responses
#[derive(Serialize, ToSchema)]
pub struct AdminUsersResponse {
    pub success: bool,
    pub users: Vec<MergedUserRow>,
    pub total: usize,
    pub sort: SortSpec,
    pub warning: Option<String>,
}
