use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `licenses` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "licenses")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub got_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One license entry in a bulk-replace request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LicenseItem {
    #[validate(length(min = 1, message = "license name is required"))]
    pub name: String,
    pub got_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
}

/// Used by `POST /api/licenses` — replaces the user's entire license list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceLicenses {
    #[validate(nested)]
    pub licenses: Vec<LicenseItem>,
}

/// Used by `PATCH /api/licenses/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicense {
    #[validate(length(min = 1, message = "license name is required"))]
    pub name: Option<String>,
    pub got_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
}
