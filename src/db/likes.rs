use sea_orm::prelude::Expr;
use sea_orm::sea_query::ExprTrait;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::{portfolio_likes, portfolios};

/// True when the user has already liked this portfolio.
pub async fn is_liked(
    db: &DatabaseConnection,
    user_id: i32,
    portfolio_id: i32,
) -> Result<bool, DbErr> {
    let count = portfolio_likes::Entity::find()
        .filter(portfolio_likes::Column::UserId.eq(user_id))
        .filter(portfolio_likes::Column::PortfolioId.eq(portfolio_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Like a portfolio: insert the like row and bump `likes_count` in the
/// same transaction. Liking twice is a conflict.
pub async fn like_portfolio(
    db: &DatabaseConnection,
    user_id: i32,
    portfolio_id: i32,
) -> Result<(), ApiError> {
    let txn = db.begin().await?;

    if portfolios::Entity::find_by_id(portfolio_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Portfolio not found".to_string()));
    }

    let already = portfolio_likes::Entity::find()
        .filter(portfolio_likes::Column::UserId.eq(user_id))
        .filter(portfolio_likes::Column::PortfolioId.eq(portfolio_id))
        .count(&txn)
        .await?
        > 0;
    if already {
        return Err(ApiError::Conflict("Portfolio already liked".to_string()));
    }

    let like = portfolio_likes::ActiveModel {
        user_id: Set(user_id),
        portfolio_id: Set(portfolio_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    // The unique index backs up the pre-check: a concurrent duplicate
    // surfaces here as a conflict instead of a 500.
    like.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::Conflict("Portfolio already liked".to_string())
        }
        _ => ApiError::Database(e),
    })?;

    portfolios::Entity::update_many()
        .col_expr(
            portfolios::Column::LikesCount,
            Expr::col(portfolios::Column::LikesCount).add(1),
        )
        .filter(portfolios::Column::Id.eq(portfolio_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(())
}

/// Remove a like: delete the row and drop `likes_count` in the same
/// transaction. Unliking something never liked is a conflict, and the
/// counter is only decremented when a row was actually removed.
pub async fn unlike_portfolio(
    db: &DatabaseConnection,
    user_id: i32,
    portfolio_id: i32,
) -> Result<(), ApiError> {
    let txn = db.begin().await?;

    if portfolios::Entity::find_by_id(portfolio_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Portfolio not found".to_string()));
    }

    let deleted = portfolio_likes::Entity::delete_many()
        .filter(portfolio_likes::Column::UserId.eq(user_id))
        .filter(portfolio_likes::Column::PortfolioId.eq(portfolio_id))
        .exec(&txn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ApiError::Conflict("Portfolio not liked yet".to_string()));
    }

    portfolios::Entity::update_many()
        .col_expr(
            portfolios::Column::LikesCount,
            Expr::col(portfolios::Column::LikesCount).sub(1),
        )
        .filter(portfolios::Column::Id.eq(portfolio_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(())
}
