use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::JwtManager;
use crate::middleware::auth::require_admin;
use crate::models::{
    AddUserForm, AdminUsersQuery, AdminUsersResponse, ApiResponse, DeleteUserForm, ServiceError,
    SortDirection, SortSpec, UpdateUserForm,
};
use crate::services::{AdminService, ALL_STATS_ZERO_WARNING};

pub const PASSWORD_MASK: &str = "••••••••";

/// Sort applied to the listing: the explicit `sort_key`/`direction` pair (or
/// the default), then the clicked column header, if any.
pub fn effective_sort(query: &AdminUsersQuery) -> SortSpec {
    let current = match query.sort_key {
        Some(key) => SortSpec::new(key, query.direction.unwrap_or(SortDirection::Ascending)),
        None => SortSpec::default(),
    };

    match query.toggle {
        Some(key) => current.request(key),
        None => current,
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(AdminUsersQuery),
    responses(
        (status = 200, description = "Credentials merged with activity statistics", body = AdminUsersResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 502, description = "Sheet service reported an error", body = ErrorResponse)
    )
)]
pub async fn list_users_api(
    admin_service: web::Data<AdminService>,
    query: web::Query<AdminUsersQuery>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    require_admin(&req, &jwt_manager)?;

    let sort = effective_sort(&query);
    let mut view = admin_service.list_users(sort, &query.search).await?;

    if !query.show_passwords {
        for row in &mut view.rows {
            row.password = PASSWORD_MASK.to_string();
        }
    }

    Ok(HttpResponse::Ok().json(AdminUsersResponse {
        success: true,
        users: view.rows,
        total: view.total,
        sort,
        warning: view
            .all_stats_zero
            .then(|| ALL_STATS_ZERO_WARNING.to_string()),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/add",
    request_body = AddUserForm,
    responses(
        (status = 200, description = "User added successfully", body = ApiResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse)
    )
)]
pub async fn add_user_api(
    admin_service: web::Data<AdminService>,
    form: web::Json<AddUserForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    require_admin(&req, &jwt_manager)?;

    let message = admin_service.add_user(&form.username, &form.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/delete",
    request_body = DeleteUserForm,
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse)
    )
)]
pub async fn delete_user_api(
    admin_service: web::Data<AdminService>,
    form: web::Json<DeleteUserForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    require_admin(&req, &jwt_manager)?;

    let message = admin_service.delete_user(&form.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/update",
    request_body = UpdateUserForm,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse)
    )
)]
pub async fn update_user_api(
    admin_service: web::Data<AdminService>,
    form: web::Json<UpdateUserForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    require_admin(&req, &jwt_manager)?;

    let message = admin_service
        .update_user(&form.original_username, &form.username, &form.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message,
    }))
}
