use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::{verify_jwt, JwtManager};
use crate::models::{AvailabilityResponse, ServiceError, SessionResponse};
use crate::monitor::AvailabilityMonitor;
use crate::services::{resolve_screen, AuthService, OFFLINE_MESSAGE};

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Screen the client should show for the current session", body = SessionResponse)
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn session_api(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    jwt_manager: web::Data<JwtManager>,
    monitor: web::Data<AvailabilityMonitor>,
) -> Result<HttpResponse, ServiceError> {
    // A missing or expired token just means there is no session
    let claims = verify_jwt(&req, &jwt_manager).ok();
    let configured = auth_service.is_configured();
    let is_working_time = monitor.is_open().await;

    let screen = resolve_screen(configured, claims.as_ref(), is_working_time);

    Ok(HttpResponse::Ok().json(SessionResponse {
        success: true,
        screen,
        configured,
        is_working_time,
        username: claims.as_ref().map(|claims| claims.sub.clone()),
        role: claims.as_ref().map(|claims| claims.role),
    }))
}

#[utoipa::path(
    get,
    path = "/api/availability",
    responses(
        (status = 200, description = "Whether installation lookup is currently open", body = AvailabilityResponse)
    ),
    security()
)]
pub async fn availability_api(
    monitor: web::Data<AvailabilityMonitor>,
) -> Result<HttpResponse, ServiceError> {
    let open = monitor.is_open().await;

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        success: true,
        open,
        message: (!open).then(|| OFFLINE_MESSAGE.to_string()),
    }))
}
