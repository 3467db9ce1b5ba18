use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `careers` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "careers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub start_date: DateTimeUtc,
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
    #[sea_orm(has_many = "super::portfolio_careers::Entity")]
    PortfolioCareers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::portfolio_careers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioCareers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One career entry in a bulk-replace request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CareerItem {
    #[validate(length(min = 1, message = "career content is required"))]
    pub content: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
}

/// Used by `POST /api/careers` — replaces the user's entire career list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceCareers {
    #[validate(nested)]
    pub careers: Vec<CareerItem>,
}

/// Used by `PATCH /api/careers/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCareer {
    #[validate(length(min = 1, message = "career content is required"))]
    pub content: Option<String>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
}
