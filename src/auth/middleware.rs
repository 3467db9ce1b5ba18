use actix_web::{Error, HttpRequest, dev::Payload, web};
use actix_web::FromRequest;
use std::future::{Ready, ready};

use crate::auth::jwt;
use crate::config::Config;
use crate::error::ApiError;

/// The authenticated caller, taken from a verified access token. Carries
/// only what the token proves; handlers load the full user row when they
/// need more.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    // 1. Extract the Bearer token from the Authorization header.
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized("Authorization header must be: Bearer <token>".to_string())
    })?;

    // 2. Get the signing secret from app config.
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| ApiError::Internal("Configuration not available".to_string()))?;

    // 3. Validate the JWT. No database hit here: the token is the proof.
    let claims = jwt::verify_access_token(token, &config.jwt_secret)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let id = claims.user_id().map_err(ApiError::Unauthorized)?;

    Ok(AuthenticatedUser {
        id,
        username: claims.username,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req).map_err(Error::from))
    }
}

/// Optional variant for public endpoints that personalize their response
/// when a valid token happens to be present. Never rejects the request.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(extract_user(req).ok())))
    }
}
