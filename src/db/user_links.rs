use sea_orm::*;

use crate::models::user_links::{self, CreateUserLink, UpdateUserLink};

/// Insert a new profile link.
pub async fn insert_link(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreateUserLink,
) -> Result<user_links::Model, DbErr> {
    let new_link = user_links::ActiveModel {
        user_id: Set(user_id),
        name: Set(input.name),
        url: Set(input.url),
        link_site: Set(input.link_site),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_link.insert(db).await
}

/// Fetch all profile links for a user, oldest first.
pub async fn get_links_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<user_links::Model>, DbErr> {
    user_links::Entity::find()
        .filter(user_links::Column::UserId.eq(user_id))
        .order_by_asc(user_links::Column::Id)
        .all(db)
        .await
}

/// Fetch a single profile link by ID.
pub async fn get_link_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<user_links::Model>, DbErr> {
    user_links::Entity::find_by_id(id).one(db).await
}

/// Update a profile link (partial). The caller is responsible for the
/// ownership check.
pub async fn update_link(
    db: &DatabaseConnection,
    link: user_links::Model,
    input: UpdateUserLink,
) -> Result<user_links::Model, DbErr> {
    let mut active: user_links::ActiveModel = link.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(url) = input.url {
        active.url = Set(url);
    }
    if let Some(link_site) = input.link_site {
        active.link_site = Set(Some(link_site));
    }

    active.update(db).await
}

/// Delete a profile link by ID.
pub async fn delete_link(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    user_links::Entity::delete_by_id(id).exec(db).await
}
