use sea_orm::*;

use crate::models::users::{self, RegisterRequest, UpdateMyInfo};

/// Insert a new user. The password must already be hashed.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: RegisterRequest,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        username: Set(input.username),
        password_hash: Set(password_hash),
        name: Set(input.name),
        email: Set(input.email),
        phone_number: Set(input.phone_number),
        introduction: Set(input.introduction),
        job: Set(input.job),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    new_user.insert(db).await
}

/// True when the username is already taken.
pub async fn username_exists(db: &DatabaseConnection, username: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// True when some user already registered this email.
pub async fn email_exists(db: &DatabaseConnection, email: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch a single user by login username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Update the caller's own profile fields (partial update).
pub async fn update_my_info(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateMyInfo,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email));
    }
    if let Some(phone_number) = input.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(introduction) = input.introduction {
        active.introduction = Set(Some(introduction));
    }
    if let Some(job) = input.job {
        active.job = Set(Some(job));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
