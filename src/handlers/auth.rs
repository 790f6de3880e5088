use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::{JwtManager, Role, TOKEN_TTL_HOURS};
use crate::middleware::auth::authenticate_request;
use crate::models::{
    ApiResponse, LoginForm, LoginResponse, RememberedUsernameResponse, ServiceError,
};
use crate::services::AuthService;

pub const REMEMBERED_USERNAME_COOKIE: &str = "remembered_username";

fn issue_token(
    jwt_manager: &JwtManager,
    username: &str,
    role: Role,
    legal_accepted: bool,
) -> Result<LoginResponse, ServiceError> {
    let token = jwt_manager
        .generate_token(username, role, legal_accepted)
        .map_err(|e| ServiceError::InternalError(format!("Failed to generate token: {}", e)))?;

    Ok(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        expires_in: (TOKEN_TTL_HOURS * 3600) as u64,
        role,
        legal_accepted,
    })
}

fn remembered_username_cookie(username: &str, remember: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(REMEMBERED_USERNAME_COOKIE, username.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::days(365))
        .finish();
    if !remember {
        cookie.make_removal();
    }
    cookie
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful - JWT token returned in response body", body = LoginResponse),
        (status = 400, description = "Missing registration number or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 503, description = "Sheet service is not configured", body = ErrorResponse)
    ),
    security()
)]
pub async fn login_api(
    auth_service: web::Data<AuthService>,
    form: web::Json<LoginForm>,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.into_inner();
    let role = auth_service.login(&form.username, &form.password).await?;

    // Administrators have nothing to look up, so the confidentiality
    // statement does not apply to them
    let legal_accepted = role == Role::Admin;
    let body = issue_token(&jwt_manager, &form.username, role, legal_accepted)?;

    Ok(HttpResponse::Ok()
        .cookie(remembered_username_cookie(&form.username, form.remember_me))
        .json(body))
}

#[utoipa::path(
    get,
    path = "/api/login/remembered",
    responses(
        (status = 200, description = "Username remembered by this browser, if any", body = RememberedUsernameResponse)
    ),
    security()
)]
pub async fn remembered_username_api(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let username = req
        .cookie(REMEMBERED_USERNAME_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|username| !username.is_empty());

    Ok(HttpResponse::Ok().json(RememberedUsernameResponse {
        success: true,
        username,
    }))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout successful", body = ApiResponse)
    ),
    security()
)]
pub async fn logout_api() -> Result<HttpResponse, ServiceError> {
    // Tokens are not tracked server side; the client discards its copy
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "Logout successful - discard your token".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/legal/accept",
    responses(
        (status = 200, description = "Statement accepted - a new token is returned", body = LoginResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn accept_legal_api(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = authenticate_request(&req, &jwt_manager)?;

    tracing::info!(username = %claims.sub, "Confidentiality statement accepted");

    let mut body = issue_token(&jwt_manager, &claims.sub, claims.role, true)?;
    body.message = "Confidentiality statement accepted".to_string();

    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/legal/decline",
    responses(
        (status = 200, description = "Statement declined - the session is over", body = ApiResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn decline_legal_api(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = authenticate_request(&req, &jwt_manager)?;

    tracing::info!(username = %claims.sub, "Confidentiality statement declined");

    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: "The confidentiality statement was declined. You have been logged out - discard your token"
            .to_string(),
    }))
}
