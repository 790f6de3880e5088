use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::JwtManager;
use crate::middleware::auth::{authenticate_request, require_user};
use crate::models::{CustomerSearchForm, CustomerSearchResponse, DistrictsResponse, ServiceError};
use crate::monitor::AvailabilityMonitor;
use crate::services::{CustomerService, OFFLINE_MESSAGE};

#[utoipa::path(
    post,
    path = "/api/customers/search",
    request_body = CustomerSearchForm,
    responses(
        (status = 200, description = "Customer found", body = CustomerSearchResponse),
        (status = 400, description = "Installation number missing", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator or statement not accepted", body = ErrorResponse),
        (status = 404, description = "No customer for this installation", body = ErrorResponse),
        (status = 503, description = "Outside working hours", body = ErrorResponse)
    )
)]
pub async fn search_customer_api(
    customer_service: web::Data<CustomerService>,
    monitor: web::Data<AvailabilityMonitor>,
    form: web::Json<CustomerSearchForm>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    let claims = require_user(&req, &jwt_manager)?;

    if !monitor.is_open().await {
        return Err(ServiceError::Unavailable(OFFLINE_MESSAGE.to_string()));
    }

    let lookup = customer_service
        .search(&claims.sub, &form.installation_number)
        .await?;

    Ok(HttpResponse::Ok().json(CustomerSearchResponse {
        success: true,
        customer: lookup.customer,
        map_embed_url: lookup.map_embed_url,
        phone_link: lookup.phone_link,
        warning: lookup.warning,
    }))
}

#[utoipa::path(
    get,
    path = "/api/districts",
    responses(
        (status = 200, description = "Districts listed in the spreadsheet", body = DistrictsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn districts_api(
    customer_service: web::Data<CustomerService>,
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let districts = customer_service.districts().await?;

    Ok(HttpResponse::Ok().json(DistrictsResponse {
        success: true,
        districts,
    }))
}
