//! Authentication middleware
//!
//! Verifies bearer tokens issued by the external auth provider and exposes
//! the authenticated identity to handlers as extractors. Admin authorization
//! is checked against the users table, not a token claim, so a role change
//! takes effect without waiting for token expiry.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::handlers::error::ApiError;
use crate::handlers::AppState;
use crate::models::User;
use crate::utils::errors::GatherHubError;

/// Claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Expiry as a unix timestamp
    pub exp: usize,
}

/// Verify a bearer token against the configured secret
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, GatherHubError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token verification failed");
        GatherHubError::Unauthorized
    })
}

/// Authenticated caller identity
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(GatherHubError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(GatherHubError::Unauthorized)?;

        let claims = verify_token(token, &state.settings.auth.jwt_secret)?;

        Ok(AuthUser { user_id: claims.sub })
    }
}

/// Authenticated caller verified to hold the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = state
            .db
            .users
            .find_by_id(auth.user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or(GatherHubError::Unauthorized)?;

        if !user.is_admin() {
            warn!(user_id = %user.id, "Unauthorized admin access attempt");
            return Err(GatherHubError::PermissionDenied(
                "Admin privileges required".to_string(),
            )
            .into());
        }

        Ok(AdminUser(user))
    }
}
