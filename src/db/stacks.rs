use sea_orm::*;
use std::collections::HashSet;

use crate::error::ApiError;
use crate::models::portfolio_stacks;
use crate::models::stacks::{self, StackItem, UpdateStack};

/// Fetch all stacks for a user, alphabetically.
pub async fn get_stacks_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<stacks::Model>, DbErr> {
    stacks::Entity::find()
        .filter(stacks::Column::UserId.eq(user_id))
        .order_by_asc(stacks::Column::Name)
        .all(db)
        .await
}

/// Fetch a single stack by ID.
pub async fn get_stack_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<stacks::Model>, DbErr> {
    stacks::Entity::find_by_id(id).one(db).await
}

/// True when the user already has a stack with this name, not counting the
/// row being renamed.
pub async fn name_taken(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    exclude_id: i32,
) -> Result<bool, DbErr> {
    let count = stacks::Entity::find()
        .filter(stacks::Column::UserId.eq(user_id))
        .filter(stacks::Column::Name.eq(name))
        .filter(stacks::Column::Id.ne(exclude_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Replace the user's entire stack list in one transaction. The incoming
/// list must not repeat a name. Portfolio snapshot rows pointing at the
/// old stacks are detached first so the source rows can go.
pub async fn replace_stacks(
    db: &DatabaseConnection,
    user_id: i32,
    items: Vec<StackItem>,
) -> Result<Vec<stacks::Model>, ApiError> {
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.name.as_str()) {
            return Err(ApiError::Conflict(format!(
                "Duplicate stack name: {}",
                item.name
            )));
        }
    }

    let txn = db.begin().await?;

    portfolio_stacks::Entity::delete_many()
        .filter(portfolio_stacks::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    stacks::Entity::delete_many()
        .filter(stacks::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(items.len());
    for item in items {
        let row = stacks::ActiveModel {
            user_id: Set(user_id),
            name: Set(item.name),
            level: Set(item.level),
            created_at: Set(now),
            ..Default::default()
        };
        created.push(row.insert(&txn).await?);
    }

    txn.commit().await?;

    Ok(created)
}

/// Update a single stack (partial). The caller is responsible for the
/// ownership and duplicate-name checks.
pub async fn update_stack(
    db: &DatabaseConnection,
    stack: stacks::Model,
    input: UpdateStack,
) -> Result<stacks::Model, DbErr> {
    let mut active: stacks::ActiveModel = stack.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(level) = input.level {
        active.level = Set(Some(level));
    }

    active.update(db).await
}

/// Delete a stack, detaching its portfolio snapshot rows in the same
/// transaction.
pub async fn delete_stack(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    portfolio_stacks::Entity::delete_many()
        .filter(portfolio_stacks::Column::StackId.eq(id))
        .exec(&txn)
        .await?;

    stacks::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await
}
