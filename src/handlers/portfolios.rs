use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::auth::authorization;
use crate::auth::middleware::{AuthenticatedUser, MaybeUser};
use crate::db::likes as like_db;
use crate::db::portfolios as portfolio_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::portfolios::{CreatePortfolio, SearchQuery, UpdatePortfolio};
use crate::response;

/// POST /api/portfolios — create a portfolio with its attached stacks,
/// careers and projects.
pub async fn create_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreatePortfolio>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let portfolio = portfolio_db::insert_portfolio(db.get_ref(), user.id, input).await?;
    let detail = portfolio_db::get_portfolio_detail(db.get_ref(), portfolio, Some(user.id)).await?;

    Ok(response::created(detail))
}

/// GET /api/users/me/portfolios — all of the caller's portfolios, private
/// included.
pub async fn get_my_portfolios(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let portfolios = portfolio_db::get_portfolios_by_user(db.get_ref(), user.id, true).await?;

    Ok(response::ok(portfolios))
}

/// GET /api/users/{user_id}/portfolios — a user's portfolios. Only the
/// owner sees private ones.
pub async fn get_user_portfolios(
    viewer: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    if user_db::get_user_by_id(db.get_ref(), user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let include_private = viewer.0.map(|u| u.id) == Some(user_id);
    let portfolios =
        portfolio_db::get_portfolios_by_user(db.get_ref(), user_id, include_private).await?;

    Ok(response::ok(portfolios))
}

/// GET /api/portfolios/search — keyword, template, visibility and sort all
/// come from the query string. A valid bearer token adds `isLiked`
/// annotations.
pub async fn search(
    viewer: MaybeUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let viewer_id = viewer.0.map(|u| u.id);
    let portfolios =
        portfolio_db::search_portfolios(db.get_ref(), query.into_inner(), viewer_id).await?;

    Ok(response::ok(portfolios))
}

/// GET /api/portfolios/recommend — the ten most viewed public portfolios.
/// A valid bearer token adds `isLiked` annotations.
pub async fn recommend(
    viewer: MaybeUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let viewer_id = viewer.0.map(|u| u.id);
    let portfolios = portfolio_db::recommend_portfolios(db.get_ref(), viewer_id).await?;

    Ok(response::ok(portfolios))
}

/// GET /api/portfolios/check — whether the caller has the pieces a
/// portfolio needs: a career, a stack, a project and a job title.
pub async fn check_requirements(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let flags = portfolio_db::check_requirements(db.get_ref(), user.id).await?;

    Ok(response::ok(flags))
}

/// GET /api/portfolios/{id} — full detail view. Works without a token;
/// a valid one adds the `isLiked` annotation and the owner's access to
/// private portfolios.
pub async fn get_portfolio(
    viewer: MaybeUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let viewer_id = viewer.0.map(|u| u.id);

    let portfolio = authorization::verify_portfolio_visible(db.get_ref(), id, viewer_id).await?;
    let detail = portfolio_db::get_portfolio_detail(db.get_ref(), portfolio, viewer_id).await?;

    // The view counter is bumped off the request path; a failure is logged
    // and the response is served regardless.
    let db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = portfolio_db::increment_views(db.get_ref(), id).await {
            tracing::warn!("Failed to increment views for portfolio {id}: {e}");
        }
    });

    Ok(response::ok(detail))
}

/// PATCH /api/portfolios/{id} — partial scalar update plus full-replace
/// semantics for any relation list present in the body.
pub async fn update_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdatePortfolio>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let portfolio = authorization::verify_portfolio_owner(db.get_ref(), id, user.id).await?;
    let updated = portfolio_db::update_portfolio(db.get_ref(), portfolio, input).await?;
    let detail = portfolio_db::get_portfolio_detail(db.get_ref(), updated, Some(user.id)).await?;

    Ok(response::ok(detail))
}

/// DELETE /api/portfolios/{id} — remove a portfolio together with its
/// likes and join rows.
pub async fn delete_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    authorization::verify_portfolio_owner(db.get_ref(), id, user.id).await?;
    portfolio_db::delete_portfolio(db.get_ref(), id).await?;

    Ok(response::message("Portfolio deleted successfully"))
}

/// POST /api/portfolios/{id}/like — like once; liking again is a conflict.
pub async fn like_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    like_db::like_portfolio(db.get_ref(), user.id, id).await?;

    Ok(response::message("Portfolio liked"))
}

/// DELETE /api/portfolios/{id}/unlike — remove the caller's like.
pub async fn unlike_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    like_db::unlike_portfolio(db.get_ref(), user.id, id).await?;

    Ok(response::message("Like removed"))
}
