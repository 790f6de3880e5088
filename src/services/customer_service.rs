use std::sync::Arc;

use reqwest::Url;

use crate::models::{Customer, ServiceError};
use crate::repositories::SheetRepository;

const MAPS_BASE_URL: &str = "https://maps.google.com/maps";
const COORDINATE_ZOOM: u8 = 17;
const ADDRESS_ZOOM: u8 = 15;

pub const NO_LOCATION_WARNING: &str =
    "No usable location (coordinates or address) was found for this customer.";

pub struct CustomerLookup {
    pub customer: Customer,
    pub map_embed_url: Option<String>,
    pub phone_link: Option<String>,
    pub warning: Option<String>,
}

pub struct CustomerService {
    repository: Arc<dyn SheetRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn SheetRepository>) -> Self {
        Self { repository }
    }

    pub async fn search(
        &self,
        username: &str,
        installation_number: &str,
    ) -> Result<CustomerLookup, ServiceError> {
        let installation_number = installation_number.trim();
        if installation_number.is_empty() {
            return Err(ServiceError::ValidationError(
                "Installation number is required".to_string(),
            ));
        }

        // Query logging feeds the admin statistics; it must never block the lookup
        let repository = Arc::clone(&self.repository);
        let log_user = username.to_string();
        let log_number = installation_number.to_string();
        tokio::spawn(async move {
            if let Err(e) = repository.log_search(&log_user, &log_number).await {
                tracing::warn!(username = %log_user, "Failed to log search query: {}", e);
            }
        });

        let customer = self
            .repository
            .find_customer(installation_number)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No customer found for installation '{}'.",
                    installation_number
                ))
            })?;

        tracing::info!(username, installation_number, "Customer lookup");

        let map_embed_url = map_embed_url(&customer);
        let warning = map_embed_url
            .is_none()
            .then(|| NO_LOCATION_WARNING.to_string());
        let phone_link = phone_link(&customer.phone);

        Ok(CustomerLookup {
            customer,
            map_embed_url,
            phone_link,
            warning,
        })
    }

    pub async fn districts(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.repository.get_districts().await?)
    }
}

/// Sheet coordinates may use a decimal comma.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Embeddable map URL: exact coordinates when both parse, otherwise the
/// street address, otherwise nothing.
pub fn map_embed_url(customer: &Customer) -> Option<String> {
    let latitude = customer.latitude.as_deref().and_then(parse_coordinate);
    let longitude = customer.longitude.as_deref().and_then(parse_coordinate);

    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        return Some(format!(
            "{}?q={},{}&t=&z={}&ie=UTF8&iwloc=&output=embed",
            MAPS_BASE_URL, latitude, longitude, COORDINATE_ZOOM
        ));
    }

    if customer.address.trim().is_empty() {
        return None;
    }

    let zoom = ADDRESS_ZOOM.to_string();
    let mut url = Url::parse_with_params(
        MAPS_BASE_URL,
        [
            ("q", customer.address.as_str()),
            ("t", ""),
            ("z", zoom.as_str()),
            ("ie", "UTF8"),
            ("iwloc", ""),
            ("output", "embed"),
        ],
    )
    .ok()?;

    // Form encoding writes spaces as `+` and a literal plus as `%2B`, so every
    // remaining `+` is a space; embed URLs expect `%20`
    let query = url.query().map(|query| query.replace('+', "%20"));
    url.set_query(query.as_deref());
    Some(url.into())
}

pub fn phone_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    (!digits.is_empty()).then(|| format!("tel:{}", digits))
}
