use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::licenses as license_db;
use crate::error::ApiError;
use crate::models::licenses::{ReplaceLicenses, UpdateLicense};
use crate::response;

/// GET /api/licenses — the caller's license list.
pub async fn get_licenses(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let licenses = license_db::get_licenses_by_user(db.get_ref(), user.id).await?;

    Ok(response::ok(licenses))
}

/// GET /api/licenses/{id} — one license, owner only.
pub async fn get_license(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let license = authorization::verify_license_owner(db.get_ref(), id, user.id).await?;

    Ok(response::ok(license))
}

/// POST /api/licenses — replace the caller's entire license list.
pub async fn replace_licenses(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ReplaceLicenses>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let created = license_db::replace_licenses(db.get_ref(), user.id, input.licenses).await?;

    Ok(response::created(created))
}

/// PATCH /api/licenses/{id} — partial update of one license.
pub async fn update_license(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateLicense>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let license = authorization::verify_license_owner(db.get_ref(), id, user.id).await?;
    let updated = license_db::update_license(db.get_ref(), license, input).await?;

    Ok(response::ok(updated))
}

/// DELETE /api/licenses/{id} — remove one license.
pub async fn delete_license(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_license_owner(db.get_ref(), id, user.id).await?;
    license_db::delete_license(db.get_ref(), id).await?;

    Ok(response::message("License deleted successfully"))
}
