use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use installation_lookup::auth::{AdminAccount, JwtManager};
use installation_lookup::config::AppConfig;
use installation_lookup::handlers;
use installation_lookup::models::HolidayCalendar;
use installation_lookup::monitor::AvailabilityMonitor;
use installation_lookup::openapi_config::{configure_openapi, ApiDoc};
use installation_lookup::repositories::{HttpSheetRepository, SheetRepository};
use installation_lookup::services::{AdminService, AuthService, AvailabilityEvaluator, CustomerService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    if !config.is_configured() {
        tracing::warn!("SCRIPT_URL is not set; every screen will report a configuration error");
    }

    let calendar = match &config.holidays_file {
        Some(path) => HolidayCalendar::load(path)
            .with_context(|| format!("Failed to load holidays from {}", path.display()))?,
        None => HolidayCalendar::builtin().context("Built-in holiday table is invalid")?,
    };
    tracing::info!(holidays = calendar.len(), "Holiday calendar loaded");

    // Background availability polling
    let monitor = AvailabilityMonitor::new(
        AvailabilityEvaluator::new(calendar),
        config.availability_poll_interval,
    );
    monitor.start().await;

    let repository: Arc<dyn SheetRepository> = Arc::new(
        HttpSheetRepository::new(config.script_url.as_deref(), config.remote_timeout)
            .context("Failed to initialise the sheet service client")?,
    );

    let admin = match &config.admin_password_hash {
        Some(hash) => AdminAccount::from_hash(&config.admin_username, hash),
        None => AdminAccount::new(&config.admin_username, &config.admin_password),
    }
    .map_err(|e| anyhow::anyhow!("Failed to set up the administrator account: {}", e))?;
    tracing::info!(username = admin.username(), "Administrator account ready");

    let auth_service = web::Data::new(AuthService::new(repository.clone(), admin));
    let customer_service = web::Data::new(CustomerService::new(repository.clone()));
    let admin_service = web::Data::new(AdminService::new(repository));
    let monitor_data = web::Data::new(monitor.clone());
    let jwt_manager = web::Data::new(JwtManager::new(&config.jwt_secret));

    tracing::info!("Installation lookup server listening on http://{}", config.bind_address);
    tracing::info!("API documentation: http://{}/swagger-ui/", config.bind_address);

    let openapi_spec = configure_openapi(ApiDoc::openapi());

    HttpServer::new(move || {
        App::new()
            .app_data(jwt_manager.clone())
            .app_data(auth_service.clone())
            .app_data(customer_service.clone())
            .app_data(admin_service.clone())
            .app_data(monitor_data.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .wrap(Logger::default())
            .service(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi_spec.clone()),
            )
            .configure(handlers::configure)
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    monitor.stop().await;

    Ok(())
}
