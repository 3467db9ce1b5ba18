use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `stacks` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stacks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub level: Option<String>,
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
    #[sea_orm(has_many = "super::portfolio_stacks::Entity")]
    PortfolioStacks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::portfolio_stacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioStacks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One stack entry in a bulk-replace request. `level` is free-form text
/// (e.g. "Beginner" / "Intermediate" / "Advanced").
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StackItem {
    #[validate(length(min = 1, message = "stack name is required"))]
    pub name: String,
    pub level: Option<String>,
}

/// Used by `POST /api/stacks` — replaces the user's entire stack list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceStacks {
    #[validate(nested)]
    pub stacks: Vec<StackItem>,
}

/// Used by `PATCH /api/stacks/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStack {
    #[validate(length(min = 1, message = "stack name is required"))]
    pub name: Option<String>,
    pub level: Option<String>,
}
