use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::{jwt, password};
use crate::config::Config;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{CheckIdRequest, LoginRequest, RegisterRequest, UserResponse};
use crate::response;

const REFRESH_COOKIE: &str = "refreshToken";

/// The refresh token travels in an httpOnly cookie, never in the body.
fn refresh_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(!config.is_development())
        .max_age(CookieDuration::seconds(config.jwt_refresh_expires_in as i64))
        .finish()
}

fn sign_token_pair(user_id: i32, username: &str, config: &Config) -> Result<(String, String), ApiError> {
    let access = jwt::sign_access_token(user_id, username, &config.jwt_secret, config.jwt_expires_in)
        .map_err(|e| ApiError::Internal(format!("Failed to sign access token: {e}")))?;
    let refresh = jwt::sign_refresh_token(
        user_id,
        &config.jwt_refresh_secret,
        config.jwt_refresh_expires_in,
    )
    .map_err(|e| ApiError::Internal(format!("Failed to sign refresh token: {e}")))?;

    Ok((access, refresh))
}

/// POST /api/auth/signup — register a new account and log it in.
pub async fn signup(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    if user_db::username_exists(db.get_ref(), &input.username).await? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }
    if let Some(email) = input.email.as_deref() {
        if user_db::email_exists(db.get_ref(), email).await? {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
    }

    let password_hash = password::hash_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?;

    let user = user_db::insert_user(db.get_ref(), input, password_hash).await?;
    let (access_token, refresh_token) = sign_token_pair(user.id, &user.username, &config)?;

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie(refresh_token, &config))
        .json(serde_json::json!({
            "status": "success",
            "data": {
                "user": UserResponse::from(user),
                "accessToken": access_token,
            },
        })))
}

/// POST /api/auth/login — exchange credentials for a token pair.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    // Same message for a wrong username and a wrong password.
    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = user_db::get_user_by_username(db.get_ref(), &input.username)
        .await?
        .ok_or_else(invalid)?;

    let matches = password::verify_password(&input.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Failed to verify password: {e}")))?;
    if !matches {
        return Err(invalid());
    }

    let (access_token, refresh_token) = sign_token_pair(user.id, &user.username, &config)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token, &config))
        .json(serde_json::json!({
            "status": "success",
            "data": {
                "user": UserResponse::from(user),
                "accessToken": access_token,
            },
        })))
}

/// POST /api/auth/refresh — mint a new access token from the refresh
/// cookie. The refresh token is rotated on every use.
pub async fn refresh(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Refresh token missing".to_string()))?;

    let claims = jwt::verify_refresh_token(cookie.value(), &config.jwt_refresh_secret)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;
    let user_id = claims.user_id().map_err(ApiError::Unauthorized)?;

    // The account may have been deleted since the token was issued.
    let user = user_db::get_user_by_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    let (access_token, refresh_token) = sign_token_pair(user.id, &user.username, &config)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token, &config))
        .json(serde_json::json!({
            "status": "success",
            "data": {
                "accessToken": access_token,
            },
        })))
}

/// POST /api/auth/logout — drop the refresh cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(REFRESH_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "status": "success",
        "message": "Logged out successfully",
    }))
}

/// POST /api/auth/check-id — username availability for the signup form.
/// A taken name is a business error, not a success with a flag.
pub async fn check_id(
    db: web::Data<DatabaseConnection>,
    body: web::Json<CheckIdRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    if user_db::username_exists(db.get_ref(), &input.username).await? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    Ok(response::ok(serde_json::json!({ "available": true })))
}
