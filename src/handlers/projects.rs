use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::projects::{CreateProject, UpdateProject};
use crate::response;

/// POST /api/projects — create a project with its child collections.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let project = project_db::insert_project(db.get_ref(), user.id, input).await?;
    let full = project_db::get_project_with_children(db.get_ref(), project).await?;

    Ok(response::created(full))
}

/// GET /api/projects — the caller's projects with children.
pub async fn get_projects(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let projects = project_db::get_projects_by_user(db.get_ref(), user.id).await?;

    Ok(response::ok(projects))
}

/// GET /api/projects/{id} — one of the caller's projects with children.
pub async fn get_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let project = authorization::verify_project_owner(db.get_ref(), id, user.id).await?;
    let full = project_db::get_project_with_children(db.get_ref(), project).await?;

    Ok(response::ok(full))
}

/// PATCH /api/projects/{id} — update scalar fields of a project.
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let project = authorization::verify_project_owner(db.get_ref(), id, user.id).await?;
    let updated = project_db::update_project(db.get_ref(), project, input).await?;
    let full = project_db::get_project_with_children(db.get_ref(), updated).await?;

    Ok(response::ok(full))
}

/// DELETE /api/projects/{id} — remove a project, its children, and any
/// portfolio references to it.
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_project_owner(db.get_ref(), id, user.id).await?;
    project_db::delete_project(db.get_ref(), id).await?;

    Ok(response::message("Project deleted successfully"))
}
