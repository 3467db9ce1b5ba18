use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::careers as career_db;
use crate::error::ApiError;
use crate::models::careers::{ReplaceCareers, UpdateCareer};
use crate::response;

/// GET /api/careers — the caller's career list.
pub async fn get_careers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let careers = career_db::get_careers_by_user(db.get_ref(), user.id).await?;

    Ok(response::ok(careers))
}

/// GET /api/careers/{id} — one career, owner only.
pub async fn get_career(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let career = authorization::verify_career_owner(db.get_ref(), id, user.id).await?;

    Ok(response::ok(career))
}

/// POST /api/careers — replace the caller's entire career list.
pub async fn replace_careers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ReplaceCareers>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let created = career_db::replace_careers(db.get_ref(), user.id, input.careers).await?;

    Ok(response::created(created))
}

/// PATCH /api/careers/{id} — partial update of one career.
pub async fn update_career(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateCareer>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let career = authorization::verify_career_owner(db.get_ref(), id, user.id).await?;
    let updated = career_db::update_career(db.get_ref(), career, input).await?;

    Ok(response::ok(updated))
}

/// DELETE /api/careers/{id} — remove one career and detach its portfolio
/// snapshots.
pub async fn delete_career(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_career_owner(db.get_ref(), id, user.id).await?;
    career_db::delete_career(db.get_ref(), id).await?;

    Ok(response::message("Career deleted successfully"))
}
