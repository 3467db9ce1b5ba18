use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::stacks as stack_db;
use crate::error::ApiError;
use crate::models::stacks::{ReplaceStacks, UpdateStack};
use crate::response;

/// GET /api/stacks — the caller's stack list.
pub async fn get_stacks(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let stacks = stack_db::get_stacks_by_user(db.get_ref(), user.id).await?;

    Ok(response::ok(stacks))
}

/// GET /api/stacks/{id} — one stack, owner only.
pub async fn get_stack(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let stack = authorization::verify_stack_owner(db.get_ref(), id, user.id).await?;

    Ok(response::ok(stack))
}

/// POST /api/stacks — replace the caller's entire stack list.
pub async fn replace_stacks(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ReplaceStacks>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let created = stack_db::replace_stacks(db.get_ref(), user.id, input.stacks).await?;

    Ok(response::created(created))
}

/// PATCH /api/stacks/{id} — partial update of one stack. Renaming onto an
/// existing stack name is rejected.
pub async fn update_stack(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateStack>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let stack = authorization::verify_stack_owner(db.get_ref(), id, user.id).await?;

    if let Some(name) = input.name.as_deref() {
        if stack_db::name_taken(db.get_ref(), user.id, name, id).await? {
            return Err(ApiError::Conflict(
                "A stack with this name already exists".to_string(),
            ));
        }
    }

    let updated = stack_db::update_stack(db.get_ref(), stack, input).await?;

    Ok(response::ok(updated))
}

/// DELETE /api/stacks/{id} — remove one stack and detach its portfolio
/// snapshots.
pub async fn delete_stack(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_stack_owner(db.get_ref(), id, user.id).await?;
    stack_db::delete_stack(db.get_ref(), id).await?;

    Ok(response::message("Stack deleted successfully"))
}
