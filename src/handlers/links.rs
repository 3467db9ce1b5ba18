use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::user_links as link_db;
use crate::error::ApiError;
use crate::models::user_links::{CreateUserLink, UpdateUserLink};
use crate::response;

/// GET /api/links — the caller's profile links.
pub async fn get_links(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let links = link_db::get_links_by_user(db.get_ref(), user.id).await?;

    Ok(response::ok(links))
}

/// GET /api/links/{id} — one profile link, owner only.
pub async fn get_link(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let link = authorization::verify_link_owner(db.get_ref(), id, user.id).await?;

    Ok(response::ok(link))
}

/// POST /api/links — add one profile link.
pub async fn create_link(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateUserLink>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let created = link_db::insert_link(db.get_ref(), user.id, input).await?;

    Ok(response::created(created))
}

/// PATCH /api/links/{id} — partial update of one profile link.
pub async fn update_link(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateUserLink>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let link = authorization::verify_link_owner(db.get_ref(), id, user.id).await?;
    let updated = link_db::update_link(db.get_ref(), link, input).await?;

    Ok(response::ok(updated))
}

/// DELETE /api/links/{id} — remove one profile link.
pub async fn delete_link(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_link_owner(db.get_ref(), id, user.id).await?;
    link_db::delete_link(db.get_ref(), id).await?;

    Ok(response::message("Link deleted successfully"))
}
