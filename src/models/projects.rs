use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub role: Option<String>,
    pub thumbnail: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::project_tags::Entity")]
    ProjectTags,
    #[sea_orm(has_many = "super::project_stacks::Entity")]
    ProjectStacks,
    #[sea_orm(has_many = "super::project_contents::Entity")]
    ProjectContents,
    #[sea_orm(has_many = "super::project_images::Entity")]
    ProjectImages,
    #[sea_orm(has_many = "super::project_links::Entity")]
    ProjectLinks,
    #[sea_orm(has_many = "super::portfolio_projects::Entity")]
    PortfolioProjects,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::project_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectTags.def()
    }
}

impl Related<super::project_stacks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectStacks.def()
    }
}

impl Related<super::project_contents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectContents.def()
    }
}

impl Related<super::project_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectImages.def()
    }
}

impl Related<super::project_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectLinks.def()
    }
}

impl Related<super::portfolio_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioProjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// One stack reference inside a project payload. The name is copied into the
/// child row, so project stacks render without touching the `stacks` table.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStackInput {
    pub stack_id: i32,
    #[validate(length(min = 1, message = "stack name is required"))]
    pub stack_name: String,
}

/// One content section inside a project payload. Empty content is allowed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectContentInput {
    #[validate(length(min = 1, message = "content title is required"))]
    pub title: String,
    pub content: String,
}

/// One link inside a project payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinkInput {
    #[validate(length(min = 1, message = "link name is required"))]
    pub name: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    pub link_site: Option<String>,
}

/// Used by `POST /api/projects` — creates the project and all of its child
/// collections together.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, message = "project title is required"))]
    pub title: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub role: Option<String>,
    #[validate(url(message = "thumbnail must be a valid URL"))]
    pub thumbnail: Option<String>,
    pub tags: Option<Vec<String>>,
    #[validate(nested)]
    pub stacks: Option<Vec<ProjectStackInput>>,
    #[validate(nested)]
    pub contents: Option<Vec<ProjectContentInput>>,
    pub images: Option<Vec<String>>,
    #[validate(nested)]
    pub links: Option<Vec<ProjectLinkInput>>,
}

/// Used by `PATCH /api/projects/{id}` — scalar fields only; child
/// collections are not patched through this endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "project title is required"))]
    pub title: Option<String>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub role: Option<String>,
    #[validate(url(message = "thumbnail must be a valid URL"))]
    pub thumbnail: Option<String>,
}

/// A project together with its child collections, as returned by the list
/// and detail endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Model,
    pub tags: Vec<super::project_tags::Model>,
    pub stacks: Vec<super::project_stacks::Model>,
    pub contents: Vec<super::project_contents::Model>,
    pub images: Vec<super::project_images::Model>,
    pub links: Vec<super::project_links::Model>,
}
