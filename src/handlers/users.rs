use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{UpdateMyInfo, UserResponse};
use crate::response;

/// GET /api/users/me — the caller's own profile.
pub async fn get_me(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let me = user_db::get_user_by_id(db.get_ref(), user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(response::ok(UserResponse::from(me)))
}

/// PATCH /api/users/me — partial profile update.
pub async fn update_me(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateMyInfo>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    if let Some(email) = input.email.as_deref() {
        let me = user_db::get_user_by_id(db.get_ref(), user.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        // Only reject when the email actually changes hands.
        if me.email.as_deref() != Some(email) && user_db::email_exists(db.get_ref(), email).await? {
            return Err(ApiError::Conflict("Email already in use".to_string()));
        }
    }

    let updated = user_db::update_my_info(db.get_ref(), user.id, input).await?;

    Ok(response::ok(UserResponse::from(updated)))
}
