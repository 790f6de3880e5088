use std::collections::BTreeMap;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::Role;
use crate::handlers;
use crate::models::{
    AddUserForm, AdminUsersResponse, ApiResponse, AvailabilityResponse, Customer,
    CustomerSearchForm, CustomerSearchResponse, DeleteUserForm, DistrictsResponse, ErrorResponse,
    LoginForm, LoginResponse, MergedUserRow, RememberedUsernameResponse, SessionResponse,
    SortDirection, SortKey, SortSpec, UpdateUserForm,
};
use crate::services::Screen;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login_api,
        handlers::auth::remembered_username_api,
        handlers::auth::logout_api,
        handlers::auth::accept_legal_api,
        handlers::auth::decline_legal_api,
        handlers::system::session_api,
        handlers::system::availability_api,
        handlers::customers::search_customer_api,
        handlers::customers::districts_api,
        handlers::admin::list_users_api,
        handlers::admin::add_user_api,
        handlers::admin::delete_user_api,
        handlers::admin::update_user_api,
    ),
    components(schemas(
        LoginForm,
        CustomerSearchForm,
        AddUserForm,
        DeleteUserForm,
        UpdateUserForm,
        ApiResponse,
        ErrorResponse,
        LoginResponse,
        RememberedUsernameResponse,
        SessionResponse,
        AvailabilityResponse,
        CustomerSearchResponse,
        DistrictsResponse,
        AdminUsersResponse,
        Customer,
        MergedUserRow,
        SortKey,
        SortDirection,
        SortSpec,
        Role,
        Screen,
    )),
    tags(
        (name = "installation-lookup", description = "Installation lookup and credential administration API")
    )
)]
pub struct ApiDoc;

pub fn configure_openapi(mut openapi: utoipa::openapi::OpenApi) -> utoipa::openapi::OpenApi {
    // HTTP Bearer scheme, not ApiKey
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        "bearer_auth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("JWT token authorization"))
                .build(),
        ),
    );

    if let Some(components) = openapi.components.as_mut() {
        components.security_schemes = security_schemes;
    }

    // Endpoints opt out with security()
    openapi.security = Some(vec![SecurityRequirement::new(
        "bearer_auth",
        Vec::<String>::new(),
    )]);

    openapi
}
