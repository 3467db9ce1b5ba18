use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `user_links` table (profile links such as GitHub or
/// a blog, distinct from per-project links).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_links")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub url: String,
    pub link_site: Option<String>,
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

/// Used by `POST /api/links`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserLink {
    #[validate(length(min = 1, message = "link name is required"))]
    pub name: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    pub link_site: Option<String>,
}

/// Used by `PATCH /api/links/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserLink {
    #[validate(length(min = 1, message = "link name is required"))]
    pub name: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    pub link_site: Option<String>,
}
