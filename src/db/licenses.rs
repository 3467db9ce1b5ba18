use sea_orm::*;

use crate::models::licenses::{self, LicenseItem, UpdateLicense};

/// Fetch all licenses for a user, most recently acquired first.
pub async fn get_licenses_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<licenses::Model>, DbErr> {
    licenses::Entity::find()
        .filter(licenses::Column::UserId.eq(user_id))
        .order_by_desc(licenses::Column::GotDate)
        .all(db)
        .await
}

/// Fetch a single license by ID.
pub async fn get_license_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<licenses::Model>, DbErr> {
    licenses::Entity::find_by_id(id).one(db).await
}

/// Replace the user's entire license list in one transaction. Licenses are
/// never snapshotted into portfolios, so there is nothing to detach.
pub async fn replace_licenses(
    db: &DatabaseConnection,
    user_id: i32,
    items: Vec<LicenseItem>,
) -> Result<Vec<licenses::Model>, DbErr> {
    let txn = db.begin().await?;

    licenses::Entity::delete_many()
        .filter(licenses::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(items.len());
    for item in items {
        let row = licenses::ActiveModel {
            user_id: Set(user_id),
            name: Set(item.name),
            got_date: Set(item.got_date),
            end_date: Set(item.end_date),
            created_at: Set(now),
            ..Default::default()
        };
        created.push(row.insert(&txn).await?);
    }

    txn.commit().await?;

    Ok(created)
}

/// Update a single license (partial). The caller is responsible for the
/// ownership check.
pub async fn update_license(
    db: &DatabaseConnection,
    license: licenses::Model,
    input: UpdateLicense,
) -> Result<licenses::Model, DbErr> {
    let mut active: licenses::ActiveModel = license.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(got_date) = input.got_date {
        active.got_date = Set(got_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(Some(end_date));
    }

    active.update(db).await
}

/// Delete a license by ID.
pub async fn delete_license(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    licenses::Entity::delete_by_id(id).exec(db).await
}
