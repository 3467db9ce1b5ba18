use sea_orm::*;

use crate::models::careers::{self, CareerItem, UpdateCareer};
use crate::models::portfolio_careers;

/// Fetch all careers for a user, most recent start date first.
pub async fn get_careers_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<careers::Model>, DbErr> {
    careers::Entity::find()
        .filter(careers::Column::UserId.eq(user_id))
        .order_by_desc(careers::Column::StartDate)
        .all(db)
        .await
}

/// Fetch a single career by ID.
pub async fn get_career_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<careers::Model>, DbErr> {
    careers::Entity::find_by_id(id).one(db).await
}

/// Replace the user's entire career list in one transaction. Portfolio
/// snapshot rows pointing at the old careers are detached first so the
/// source rows can go.
pub async fn replace_careers(
    db: &DatabaseConnection,
    user_id: i32,
    items: Vec<CareerItem>,
) -> Result<Vec<careers::Model>, DbErr> {
    let txn = db.begin().await?;

    portfolio_careers::Entity::delete_many()
        .filter(portfolio_careers::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    careers::Entity::delete_many()
        .filter(careers::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(items.len());
    for item in items {
        let row = careers::ActiveModel {
            user_id: Set(user_id),
            content: Set(item.content),
            start_date: Set(item.start_date),
            end_date: Set(item.end_date),
            created_at: Set(now),
            ..Default::default()
        };
        created.push(row.insert(&txn).await?);
    }

    txn.commit().await?;

    Ok(created)
}

/// Update a single career (partial). The caller is responsible for the
/// ownership check.
pub async fn update_career(
    db: &DatabaseConnection,
    career: careers::Model,
    input: UpdateCareer,
) -> Result<careers::Model, DbErr> {
    let mut active: careers::ActiveModel = career.into();

    if let Some(content) = input.content {
        active.content = Set(content);
    }
    if let Some(start_date) = input.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(Some(end_date));
    }

    active.update(db).await
}

/// Delete a career, detaching its portfolio snapshot rows in the same
/// transaction.
pub async fn delete_career(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    portfolio_careers::Entity::delete_many()
        .filter(portfolio_careers::Column::CareerId.eq(id))
        .exec(&txn)
        .await?;

    careers::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await
}
