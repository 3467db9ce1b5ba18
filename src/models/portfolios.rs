use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The `Template` enum maps to a TEXT column stored as uppercase strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum Template {
    #[sea_orm(string_value = "STANDARD")]
    Standard,
    #[sea_orm(string_value = "IMAGE")]
    Image,
}

/// The `Visibility` enum maps to a TEXT column stored as uppercase strings.
/// `Link` means reachable by direct URL but excluded from public search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[sea_orm(string_value = "PUBLIC")]
    Public,
    #[sea_orm(string_value = "PRIVATE")]
    Private,
    #[sea_orm(string_value = "LINK")]
    Link,
}

/// SeaORM entity for the `portfolios` table.
///
/// `about_me` holds the serialized JSON of the about-me sections; `views`
/// and `likes_count` are denormalized counters maintained by the db layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub template: Template,
    pub visibility: Visibility,
    #[sea_orm(column_type = "Text", nullable)]
    pub greeting: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub introduction: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about_me: Option<String>,
    pub thumbnail: Option<String>,
    pub cover_image: Option<String>,
    pub views: i32,
    pub likes_count: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::portfolio_careers::Entity")]
    PortfolioCareers,
    #[sea_orm(has_many = "super::portfolio_projects::Entity")]
    PortfolioProjects,
    #[sea_orm(has_many = "super::portfolio_likes::Entity")]
    PortfolioLikes,
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

impl Related<super::portfolio_careers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioCareers.def()
    }
}

impl Related<super::portfolio_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioProjects.def()
    }
}

impl Related<super::portfolio_likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioLikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parse the stored about-me JSON back into sections. A malformed blob
    /// is treated as absent rather than failing the read.
    pub fn about_sections(&self) -> Option<Vec<AboutSection>> {
        self.about_me
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

// ── DTOs ──

/// One ordered section of the portfolio's about-me block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    pub title: String,
    pub content: String,
}

/// One stack to attach: `id` must be a stack owned by the caller, `rank`
/// orders the entries on the rendered page.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillInput {
    pub id: i32,
    pub rank: i32,
}

/// One career to attach: `id` must be a career owned by the caller,
/// `description` is the portfolio-specific annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct CareerInput {
    pub id: i32,
    pub description: String,
}

/// Used by `POST /api/portfolios`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolio {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub template: Template,
    #[serde(rename = "isPublic")]
    pub visibility: Visibility,
    pub greeting: Option<String>,
    pub introduction: Option<String>,
    pub about_me: Option<Vec<AboutSection>>,
    pub thumbnail: Option<String>,
    pub cover_image: Option<String>,
    pub skills: Option<Vec<SkillInput>>,
    pub careers: Option<Vec<CareerInput>>,
    pub project_ids: Option<Vec<i32>>,
}

/// Used by `PATCH /api/portfolios/{id}`.
///
/// Scalar fields follow partial-update semantics. The three relation lists
/// follow full-replace semantics: present (even empty) means the join set is
/// replaced wholesale, absent means untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolio {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    pub template: Option<Template>,
    #[serde(rename = "isPublic")]
    pub visibility: Option<Visibility>,
    pub greeting: Option<String>,
    pub introduction: Option<String>,
    pub about_me: Option<Vec<AboutSection>>,
    pub thumbnail: Option<String>,
    pub cover_image: Option<String>,
    pub skills: Option<Vec<SkillInput>>,
    pub careers: Option<Vec<CareerInput>>,
    pub project_ids: Option<Vec<i32>>,
}

/// Sort orders accepted by `GET /api/portfolios/search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Recent,
    Views,
    Likes,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Recent
    }
}

/// Query parameters for `GET /api/portfolios/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub sort: SortBy,
    pub template: Option<Template>,
    #[serde(rename = "isPublic")]
    pub visibility: Option<Visibility>,
}

/// A portfolio row enriched with owner info, as returned by the list,
/// search, and recommend endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio_id: i32,
    pub user_id: i32,
    pub user_name: Option<String>,
    pub user_job: Option<String>,
    pub user_email: Option<String>,
    pub user_phone_number: Option<String>,
    pub title: String,
    pub thumbnail: Option<String>,
    pub cover_image: Option<String>,
    pub template: Template,
    pub views: i32,
    pub likes_count: i32,
    #[serde(rename = "isPublic")]
    pub visibility: Visibility,
    pub greeting: Option<String>,
    pub introduction: Option<String>,
    pub about_me: Option<Vec<AboutSection>>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl PortfolioSummary {
    pub fn from_model(model: Model, user: Option<super::users::Model>) -> Self {
        let about_me = model.about_sections();
        Self {
            portfolio_id: model.id,
            user_id: model.user_id,
            user_name: user.as_ref().map(|u| u.name.clone()),
            user_job: user.as_ref().and_then(|u| u.job.clone()),
            user_email: user.as_ref().and_then(|u| u.email.clone()),
            user_phone_number: user.as_ref().and_then(|u| u.phone_number.clone()),
            title: model.title,
            thumbnail: model.thumbnail,
            cover_image: model.cover_image,
            template: model.template,
            views: model.views,
            likes_count: model.likes_count,
            visibility: model.visibility,
            greeting: model.greeting,
            introduction: model.introduction,
            about_me,
            created_at: model.created_at,
            updated_at: model.updated_at,
            is_liked: None,
        }
    }
}

/// One snapshot stack entry in a detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStackEntry {
    pub stack_id: i32,
    pub name: String,
    pub level: Option<String>,
    pub rank: i32,
}

impl From<super::portfolio_stacks::Model> for PortfolioStackEntry {
    fn from(m: super::portfolio_stacks::Model) -> Self {
        Self {
            stack_id: m.stack_id,
            name: m.name,
            level: m.level,
            rank: m.rank,
        }
    }
}

/// One snapshot career entry in a detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCareerEntry {
    pub career_id: i32,
    pub content: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub description: Option<String>,
}

impl From<super::portfolio_careers::Model> for PortfolioCareerEntry {
    fn from(m: super::portfolio_careers::Model) -> Self {
        Self {
            career_id: m.career_id,
            content: m.content,
            start_date: m.start_date,
            end_date: m.end_date,
            description: m.description,
        }
    }
}

/// One license of the portfolio owner (live read, no snapshot).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEntry {
    pub license_id: i32,
    pub name: String,
    pub got_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
}

impl From<super::licenses::Model> for LicenseEntry {
    fn from(m: super::licenses::Model) -> Self {
        Self {
            license_id: m.id,
            name: m.name,
            got_date: m.got_date,
            end_date: m.end_date,
        }
    }
}

/// A copied stack reference on a project summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStackRef {
    pub stack_id: i32,
    pub stack_name: String,
}

/// A live project summary in a detail response: the first content section
/// doubles as the description, and the first link tagged `github` (if any)
/// is surfaced as the repository URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjectSummary {
    pub project_id: i32,
    pub title: String,
    pub thumbnail: Option<String>,
    pub role: Option<String>,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub description: Option<String>,
    pub stacks: Vec<ProjectStackRef>,
    pub github_url: Option<String>,
}

/// Full detail response for `GET /api/portfolios/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetail {
    #[serde(flatten)]
    pub summary: PortfolioSummary,
    pub stacks: Vec<PortfolioStackEntry>,
    pub careers: Vec<PortfolioCareerEntry>,
    pub licenses: Vec<LicenseEntry>,
    pub projects: Vec<PortfolioProjectSummary>,
}

/// Answer for `GET /api/portfolios/check` — whether the user has the pieces
/// a portfolio is assembled from.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementFlags {
    pub career: bool,
    pub stack: bool,
    pub project: bool,
    pub job: bool,
}
