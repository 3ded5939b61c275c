//! Authentication middleware for JWT token validation
//!
//! Tokens are issued by the external identity service; this module only
//! verifies them and turns the claims into an [`Actor`] that handlers receive
//! through request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::models::Role;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{config::AuthConfig, error::ApiError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Role identifier
    pub role: String,
    /// Expiration time
    pub exp: u64,
}

/// Identity of the caller, passed explicitly into every resource handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error)]
pub enum AuthSetupError {
    #[error("either auth.jwt_secret or auth.jwt_public_key must be configured")]
    MissingKey,

    #[error("failed to read public key file: {0}")]
    KeyFile(#[from] std::io::Error),

    #[error("invalid public key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Verifies bearer tokens
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// HS256 verifier over a shared secret
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// RS256 verifier over a PEM public key
    pub fn from_rsa_pem(pem: &str) -> Result<Self, AuthSetupError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;

        Ok(Self {
            decoding_key: DecodingKey::from_rsa_pem(pem.as_bytes())?,
            validation,
        })
    }

    /// Pick the verifier from configuration; a public key wins over a secret
    ///
    /// The public key may be given inline or as a path to a PEM file.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthSetupError> {
        if let Some(public_key) = &config.jwt_public_key {
            let pem = if public_key.starts_with("-----BEGIN") {
                public_key.clone()
            } else {
                std::fs::read_to_string(public_key)?.trim().to_string()
            };
            return Self::from_rsa_pem(&pem);
        }

        match &config.jwt_secret {
            Some(secret) if !secret.is_empty() => Ok(Self::from_secret(secret)),
            _ => Err(AuthSetupError::MissingKey),
        }
    }

    /// Validate a token and resolve the caller
    pub fn verify(&self, token: &str) -> Result<Actor, ApiError> {
        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Failed to validate token: {}", e);
                ApiError::Unauthorized
            })?;

        let role = token_data.claims.role.parse::<Role>().map_err(|e| {
            warn!("Token carries {}", e);
            ApiError::Unauthorized
        })?;

        Ok(Actor::new(token_data.claims.sub, role))
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let actor = state.verifier.verify(bearer.token())?;

    // Insert the caller into the request extensions
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

/// Rejects callers outside the admin-only section
pub fn ensure_admin(actor: &Actor) -> Result<(), ApiError> {
    if actor.is_admin() {
        Ok(())
    } else {
        warn!("User {} with role {} denied admin section", actor.id, actor.role);
        Err(ApiError::Forbidden)
    }
}
