use crate::auth::{verify_jwt, Claims, JwtManager};
use crate::models::ServiceError;

pub fn authenticate_request(
    req: &actix_web::HttpRequest,
    jwt_manager: &JwtManager,
) -> Result<Claims, ServiceError> {
    verify_jwt(req, jwt_manager)
        .map_err(|_| ServiceError::AuthenticationError("Not authenticated".to_string()))
}

pub fn require_admin(
    req: &actix_web::HttpRequest,
    jwt_manager: &JwtManager,
) -> Result<Claims, ServiceError> {
    let claims = authenticate_request(req, jwt_manager)?;
    if !claims.is_admin() {
        return Err(ServiceError::Forbidden("Administrator access required".to_string()));
    }
    Ok(claims)
}

/// A regular user who has accepted the confidentiality statement.
pub fn require_user(
    req: &actix_web::HttpRequest,
    jwt_manager: &JwtManager,
) -> Result<Claims, ServiceError> {
    let claims = authenticate_request(req, jwt_manager)?;
    if claims.is_admin() {
        return Err(ServiceError::Forbidden(
            "Installation lookup is not available to the administrator".to_string(),
        ));
    }
    if !claims.legal_accepted {
        return Err(ServiceError::Forbidden(
            "The confidentiality statement must be accepted first".to_string(),
        ));
    }
    Ok(claims)
}
