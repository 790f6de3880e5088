use actix_web::http::header::Header;
use actix_web::HttpRequest;
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, TokenData, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ServiceError;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub role: Role,
    pub legal_accepted: bool,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_token(
        &self,
        username: &str,
        role: Role,
        legal_accepted: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_in = Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: username.to_string(),
            role,
            legal_accepted,
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&JwtHeader::default(), &claims, &self.encoding_key)
    }

    pub fn verify_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
    }
}

pub fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    let bearer = Authorization::<Bearer>::parse(req).ok()?.into_scheme();
    let token = bearer.token();

    // Handle case where token accidentally starts with "bearer " due to Swagger UI bug
    match token.strip_prefix("bearer ") {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(token.to_string()),
    }
}

pub fn verify_jwt(req: &HttpRequest, jwt_manager: &JwtManager) -> Result<Claims, ServiceError> {
    let token = extract_token_from_header(req).ok_or_else(|| {
        ServiceError::AuthenticationError("Missing Authorization header".to_string())
    })?;

    jwt_manager
        .verify_token(&token)
        .map(|token_data| token_data.claims)
        .map_err(|_| ServiceError::AuthenticationError("Invalid token".to_string()))
}

/// The locally configured administrator; never checked against the sheet.
#[derive(Clone)]
pub struct AdminAccount {
    username: String,
    password_hash: String,
}

impl AdminAccount {
    pub fn new(username: &str, password: &str) -> Result<Self, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))?;

        Ok(Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub fn from_hash(username: &str, password_hash: &str) -> Result<Self, ServiceError> {
        PasswordHash::new(password_hash).map_err(|e| {
            ServiceError::InternalError(format!("Invalid admin password hash: {}", e))
        })?;

        Ok(Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        match PasswordHash::new(&self.password_hash) {
            Ok(parsed_hash) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}
