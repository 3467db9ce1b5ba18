use sea_orm::DatabaseConnection;

use crate::db::careers as career_db;
use crate::db::licenses as license_db;
use crate::db::portfolios as portfolio_db;
use crate::db::projects as project_db;
use crate::db::stacks as stack_db;
use crate::db::user_links as link_db;
use crate::error::ApiError;
use crate::models::portfolios::Visibility;
use crate::models::{careers, licenses, portfolios, projects, stacks, user_links};

/// Load a portfolio and confirm the caller owns it. Existence is checked
/// before ownership, so a missing id reads as 404 and someone else's as 403.
pub async fn verify_portfolio_owner(
    db: &DatabaseConnection,
    portfolio_id: i32,
    user_id: i32,
) -> Result<portfolios::Model, ApiError> {
    let portfolio = portfolio_db::get_portfolio_by_id(db, portfolio_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_string()))?;

    if portfolio.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You do not own this portfolio".to_string(),
        ));
    }

    Ok(portfolio)
}

/// Load a portfolio for viewing. Private portfolios are only visible to
/// their owner; link-visibility ones are reachable by anyone with the id.
pub async fn verify_portfolio_visible(
    db: &DatabaseConnection,
    portfolio_id: i32,
    viewer: Option<i32>,
) -> Result<portfolios::Model, ApiError> {
    let portfolio = portfolio_db::get_portfolio_by_id(db, portfolio_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Portfolio not found".to_string()))?;

    if portfolio.visibility == Visibility::Private && viewer != Some(portfolio.user_id) {
        return Err(ApiError::Forbidden("This portfolio is private".to_string()));
    }

    Ok(portfolio)
}

pub async fn verify_career_owner(
    db: &DatabaseConnection,
    career_id: i32,
    user_id: i32,
) -> Result<careers::Model, ApiError> {
    let career = career_db::get_career_by_id(db, career_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Career not found".to_string()))?;

    if career.user_id != user_id {
        return Err(ApiError::Forbidden("You do not own this career".to_string()));
    }

    Ok(career)
}

pub async fn verify_license_owner(
    db: &DatabaseConnection,
    license_id: i32,
    user_id: i32,
) -> Result<licenses::Model, ApiError> {
    let license = license_db::get_license_by_id(db, license_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("License not found".to_string()))?;

    if license.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You do not own this license".to_string(),
        ));
    }

    Ok(license)
}

pub async fn verify_stack_owner(
    db: &DatabaseConnection,
    stack_id: i32,
    user_id: i32,
) -> Result<stacks::Model, ApiError> {
    let stack = stack_db::get_stack_by_id(db, stack_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Stack not found".to_string()))?;

    if stack.user_id != user_id {
        return Err(ApiError::Forbidden("You do not own this stack".to_string()));
    }

    Ok(stack)
}

pub async fn verify_link_owner(
    db: &DatabaseConnection,
    link_id: i32,
    user_id: i32,
) -> Result<user_links::Model, ApiError> {
    let link = link_db::get_link_by_id(db, link_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))?;

    if link.user_id != user_id {
        return Err(ApiError::Forbidden("You do not own this link".to_string()));
    }

    Ok(link)
}

pub async fn verify_project_owner(
    db: &DatabaseConnection,
    project_id: i32,
    user_id: i32,
) -> Result<projects::Model, ApiError> {
    let project = project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    if project.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You do not own this project".to_string(),
        ));
    }

    Ok(project)
}
