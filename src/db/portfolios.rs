use sea_orm::prelude::Expr;
use sea_orm::sea_query::ExprTrait;
use sea_orm::*;
use std::collections::{HashMap, HashSet};

use crate::error::ApiError;
use crate::models::portfolios::{
    self, AboutSection, CareerInput, CreatePortfolio, LicenseEntry, PortfolioCareerEntry,
    PortfolioDetail, PortfolioProjectSummary, PortfolioStackEntry, PortfolioSummary,
    ProjectStackRef, RequirementFlags, SearchQuery, SkillInput, SortBy, UpdatePortfolio,
    Visibility,
};
use crate::models::{
    careers, licenses, portfolio_careers, portfolio_likes, portfolio_projects, portfolio_stacks,
    project_contents, project_links, project_stacks, projects, stacks, users,
};

/// Insert a new portfolio and attach its stacks, careers and projects in
/// one transaction. Attached stacks and careers are snapshotted: name,
/// level, content and dates are copied into the join rows.
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreatePortfolio,
) -> Result<portfolios::Model, ApiError> {
    let about_me = serialize_about(input.about_me.as_ref())?;
    let txn = db.begin().await?;

    let now = chrono::Utc::now();
    let portfolio = portfolios::ActiveModel {
        user_id: Set(user_id),
        title: Set(input.title),
        template: Set(input.template),
        visibility: Set(input.visibility),
        greeting: Set(input.greeting),
        introduction: Set(input.introduction),
        about_me: Set(about_me),
        thumbnail: Set(input.thumbnail),
        cover_image: Set(input.cover_image),
        views: Set(0),
        likes_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(skills) = input.skills {
        attach_skills(&txn, portfolio.id, user_id, skills).await?;
    }
    if let Some(career_inputs) = input.careers {
        attach_careers(&txn, portfolio.id, user_id, career_inputs).await?;
    }
    if let Some(project_ids) = input.project_ids {
        attach_projects(&txn, portfolio.id, user_id, project_ids).await?;
    }

    txn.commit().await?;

    Ok(portfolio)
}

/// Update a portfolio. Scalar fields are patched; each relation list that
/// is present replaces the existing set wholesale (an empty list clears
/// it), re-snapshotting from the current source rows.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    portfolio: portfolios::Model,
    input: UpdatePortfolio,
) -> Result<portfolios::Model, ApiError> {
    let portfolio_id = portfolio.id;
    let user_id = portfolio.user_id;
    let txn = db.begin().await?;

    let mut active: portfolios::ActiveModel = portfolio.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(template) = input.template {
        active.template = Set(template);
    }
    if let Some(visibility) = input.visibility {
        active.visibility = Set(visibility);
    }
    if let Some(greeting) = input.greeting {
        active.greeting = Set(Some(greeting));
    }
    if let Some(introduction) = input.introduction {
        active.introduction = Set(Some(introduction));
    }
    if let Some(sections) = input.about_me.as_ref() {
        active.about_me = Set(serialize_about(Some(sections))?);
    }
    if let Some(thumbnail) = input.thumbnail {
        active.thumbnail = Set(Some(thumbnail));
    }
    if let Some(cover_image) = input.cover_image {
        active.cover_image = Set(Some(cover_image));
    }
    active.updated_at = Set(chrono::Utc::now());

    let updated = active.update(&txn).await?;

    if let Some(skills) = input.skills {
        portfolio_stacks::Entity::delete_many()
            .filter(portfolio_stacks::Column::PortfolioId.eq(portfolio_id))
            .exec(&txn)
            .await?;
        attach_skills(&txn, portfolio_id, user_id, skills).await?;
    }
    if let Some(career_inputs) = input.careers {
        portfolio_careers::Entity::delete_many()
            .filter(portfolio_careers::Column::PortfolioId.eq(portfolio_id))
            .exec(&txn)
            .await?;
        attach_careers(&txn, portfolio_id, user_id, career_inputs).await?;
    }
    if let Some(project_ids) = input.project_ids {
        portfolio_projects::Entity::delete_many()
            .filter(portfolio_projects::Column::PortfolioId.eq(portfolio_id))
            .exec(&txn)
            .await?;
        attach_projects(&txn, portfolio_id, user_id, project_ids).await?;
    }

    txn.commit().await?;

    Ok(updated)
}

/// Delete a portfolio: likes first, then the three join tables, then the
/// row itself, all in one transaction.
pub async fn delete_portfolio(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    portfolio_likes::Entity::delete_many()
        .filter(portfolio_likes::Column::PortfolioId.eq(id))
        .exec(&txn)
        .await?;
    portfolio_stacks::Entity::delete_many()
        .filter(portfolio_stacks::Column::PortfolioId.eq(id))
        .exec(&txn)
        .await?;
    portfolio_careers::Entity::delete_many()
        .filter(portfolio_careers::Column::PortfolioId.eq(id))
        .exec(&txn)
        .await?;
    portfolio_projects::Entity::delete_many()
        .filter(portfolio_projects::Column::PortfolioId.eq(id))
        .exec(&txn)
        .await?;

    portfolios::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await
}

/// Fetch a single portfolio by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<portfolios::Model>, DbErr> {
    portfolios::Entity::find_by_id(id).one(db).await
}

/// Fetch a user's portfolios, newest first. Private ones are included only
/// when the caller is the owner.
pub async fn get_portfolios_by_user(
    db: &DatabaseConnection,
    user_id: i32,
    include_private: bool,
) -> Result<Vec<PortfolioSummary>, DbErr> {
    let mut query = portfolios::Entity::find().filter(portfolios::Column::UserId.eq(user_id));
    if !include_private {
        query = query.filter(portfolios::Column::Visibility.eq(Visibility::Public));
    }

    let rows = query
        .order_by_desc(portfolios::Column::CreatedAt)
        .order_by_desc(portfolios::Column::Id)
        .all(db)
        .await?;

    let user = users::Entity::find_by_id(user_id).one(db).await?;

    Ok(rows
        .into_iter()
        .map(|p| PortfolioSummary::from_model(p, user.clone()))
        .collect())
}

/// Search portfolios. The keyword is a substring match against title,
/// greeting and introduction; visibility defaults to public when the
/// parameter is absent. A logged-in viewer gets `isLiked` annotations.
pub async fn search_portfolios(
    db: &DatabaseConnection,
    query: SearchQuery,
    viewer: Option<i32>,
) -> Result<Vec<PortfolioSummary>, DbErr> {
    let mut condition = Condition::all();

    if let Some(keyword) = query.keyword.filter(|k| !k.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(portfolios::Column::Title.contains(&keyword))
                .add(portfolios::Column::Greeting.contains(&keyword))
                .add(portfolios::Column::Introduction.contains(&keyword)),
        );
    }
    if let Some(template) = query.template {
        condition = condition.add(portfolios::Column::Template.eq(template));
    }
    condition = condition.add(
        portfolios::Column::Visibility.eq(query.visibility.unwrap_or(Visibility::Public)),
    );

    let select = portfolios::Entity::find().filter(condition);
    let select = match query.sort {
        SortBy::Recent => select.order_by_desc(portfolios::Column::CreatedAt),
        SortBy::Views => select.order_by_desc(portfolios::Column::Views),
        SortBy::Likes => select.order_by_desc(portfolios::Column::LikesCount),
    };

    let rows = select
        .order_by_desc(portfolios::Column::Id)
        .find_also_related(users::Entity)
        .all(db)
        .await?;

    let mut summaries: Vec<PortfolioSummary> = rows
        .into_iter()
        .map(|(p, u)| PortfolioSummary::from_model(p, u))
        .collect();
    annotate_likes(db, viewer, &mut summaries).await?;

    Ok(summaries)
}

/// The ten most viewed public portfolios. A logged-in viewer gets
/// `isLiked` annotations.
pub async fn recommend_portfolios(
    db: &DatabaseConnection,
    viewer: Option<i32>,
) -> Result<Vec<PortfolioSummary>, DbErr> {
    let rows = portfolios::Entity::find()
        .filter(portfolios::Column::Visibility.eq(Visibility::Public))
        .order_by_desc(portfolios::Column::Views)
        .order_by_desc(portfolios::Column::Id)
        .limit(10)
        .find_also_related(users::Entity)
        .all(db)
        .await?;

    let mut summaries: Vec<PortfolioSummary> = rows
        .into_iter()
        .map(|(p, u)| PortfolioSummary::from_model(p, u))
        .collect();
    annotate_likes(db, viewer, &mut summaries).await?;

    Ok(summaries)
}

/// Mark each summary with whether the viewer has liked it. Anonymous
/// viewers get no annotation at all.
async fn annotate_likes(
    db: &DatabaseConnection,
    viewer: Option<i32>,
    summaries: &mut [PortfolioSummary],
) -> Result<(), DbErr> {
    let user_id = match viewer {
        Some(id) => id,
        None => return Ok(()),
    };
    if summaries.is_empty() {
        return Ok(());
    }

    let ids: Vec<i32> = summaries.iter().map(|s| s.portfolio_id).collect();
    let liked: HashSet<i32> = portfolio_likes::Entity::find()
        .filter(portfolio_likes::Column::UserId.eq(user_id))
        .filter(portfolio_likes::Column::PortfolioId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|like| like.portfolio_id)
        .collect();

    for summary in summaries.iter_mut() {
        summary.is_liked = Some(liked.contains(&summary.portfolio_id));
    }

    Ok(())
}

/// Assemble the full detail view: snapshot stacks and careers from the
/// join tables, the owner's licenses live, and summaries of the attached
/// projects. `viewer` controls the `isLiked` annotation.
pub async fn get_portfolio_detail(
    db: &DatabaseConnection,
    portfolio: portfolios::Model,
    viewer: Option<i32>,
) -> Result<PortfolioDetail, DbErr> {
    let portfolio_id = portfolio.id;
    let owner_id = portfolio.user_id;

    let owner = users::Entity::find_by_id(owner_id).one(db).await?;
    let mut summary = PortfolioSummary::from_model(portfolio, owner);

    if let Some(user_id) = viewer {
        let liked = portfolio_likes::Entity::find()
            .filter(portfolio_likes::Column::PortfolioId.eq(portfolio_id))
            .filter(portfolio_likes::Column::UserId.eq(user_id))
            .count(db)
            .await?
            > 0;
        summary.is_liked = Some(liked);
    }

    let stack_entries = portfolio_stacks::Entity::find()
        .filter(portfolio_stacks::Column::PortfolioId.eq(portfolio_id))
        .order_by_asc(portfolio_stacks::Column::Rank)
        .order_by_asc(portfolio_stacks::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(PortfolioStackEntry::from)
        .collect();

    let career_entries = portfolio_careers::Entity::find()
        .filter(portfolio_careers::Column::PortfolioId.eq(portfolio_id))
        .order_by_desc(portfolio_careers::Column::StartDate)
        .all(db)
        .await?
        .into_iter()
        .map(PortfolioCareerEntry::from)
        .collect();

    let license_entries = licenses::Entity::find()
        .filter(licenses::Column::UserId.eq(owner_id))
        .order_by_desc(licenses::Column::GotDate)
        .all(db)
        .await?
        .into_iter()
        .map(LicenseEntry::from)
        .collect();

    let project_entries = project_summaries(db, portfolio_id).await?;

    Ok(PortfolioDetail {
        summary,
        stacks: stack_entries,
        careers: career_entries,
        licenses: license_entries,
        projects: project_entries,
    })
}

/// Bump the view counter. Runs outside the request transaction; callers
/// spawn it and only log failures.
pub async fn increment_views(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    portfolios::Entity::update_many()
        .col_expr(
            portfolios::Column::Views,
            Expr::col(portfolios::Column::Views).add(1),
        )
        .filter(portfolios::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(())
}

/// Report which building blocks the user already has: at least one career,
/// at least one stack, at least one project, and a non-empty job title.
pub async fn check_requirements(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<RequirementFlags, DbErr> {
    let career = careers::Entity::find()
        .filter(careers::Column::UserId.eq(user_id))
        .count(db)
        .await?
        > 0;
    let stack = stacks::Entity::find()
        .filter(stacks::Column::UserId.eq(user_id))
        .count(db)
        .await?
        > 0;
    let project = projects::Entity::find()
        .filter(projects::Column::UserId.eq(user_id))
        .count(db)
        .await?
        > 0;
    let job = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .and_then(|u| u.job)
        .is_some_and(|j| !j.is_empty());

    Ok(RequirementFlags {
        career,
        stack,
        project,
        job,
    })
}

fn serialize_about(sections: Option<&Vec<AboutSection>>) -> Result<Option<String>, ApiError> {
    match sections {
        Some(list) => serde_json::to_string(list)
            .map(Some)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize aboutMe: {e}"))),
        None => Ok(None),
    }
}

/// Snapshot the referenced stacks into `portfolio_stacks`. Every id must
/// belong to the user or the whole transaction is aborted.
async fn attach_skills(
    txn: &DatabaseTransaction,
    portfolio_id: i32,
    user_id: i32,
    skills: Vec<SkillInput>,
) -> Result<(), ApiError> {
    if skills.is_empty() {
        return Ok(());
    }

    let ids: Vec<i32> = skills.iter().map(|s| s.id).collect();
    let owned: HashMap<i32, stacks::Model> = stacks::Entity::find()
        .filter(stacks::Column::UserId.eq(user_id))
        .filter(stacks::Column::Id.is_in(ids))
        .all(txn)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut rows = Vec::with_capacity(skills.len());
    for skill in skills {
        let source = owned
            .get(&skill.id)
            .ok_or_else(|| ApiError::NotFound(format!("Stack {} not found", skill.id)))?;
        rows.push(portfolio_stacks::ActiveModel {
            portfolio_id: Set(portfolio_id),
            stack_id: Set(source.id),
            user_id: Set(user_id),
            name: Set(source.name.clone()),
            level: Set(source.level.clone()),
            rank: Set(skill.rank),
            ..Default::default()
        });
    }

    portfolio_stacks::Entity::insert_many(rows).exec(txn).await?;

    Ok(())
}

/// Snapshot the referenced careers into `portfolio_careers`. Every id must
/// belong to the user or the whole transaction is aborted.
async fn attach_careers(
    txn: &DatabaseTransaction,
    portfolio_id: i32,
    user_id: i32,
    career_inputs: Vec<CareerInput>,
) -> Result<(), ApiError> {
    if career_inputs.is_empty() {
        return Ok(());
    }

    let ids: Vec<i32> = career_inputs.iter().map(|c| c.id).collect();
    let owned: HashMap<i32, careers::Model> = careers::Entity::find()
        .filter(careers::Column::UserId.eq(user_id))
        .filter(careers::Column::Id.is_in(ids))
        .all(txn)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut rows = Vec::with_capacity(career_inputs.len());
    for career in career_inputs {
        let source = owned
            .get(&career.id)
            .ok_or_else(|| ApiError::NotFound(format!("Career {} not found", career.id)))?;
        rows.push(portfolio_careers::ActiveModel {
            portfolio_id: Set(portfolio_id),
            career_id: Set(source.id),
            user_id: Set(user_id),
            content: Set(source.content.clone()),
            start_date: Set(source.start_date),
            end_date: Set(source.end_date),
            description: Set(Some(career.description)),
            ..Default::default()
        });
    }

    portfolio_careers::Entity::insert_many(rows).exec(txn).await?;

    Ok(())
}

/// Reference the given projects from this portfolio. Ids are deduplicated;
/// every one must belong to the user or the whole transaction is aborted.
async fn attach_projects(
    txn: &DatabaseTransaction,
    portfolio_id: i32,
    user_id: i32,
    project_ids: Vec<i32>,
) -> Result<(), ApiError> {
    let mut seen = HashSet::new();
    let project_ids: Vec<i32> = project_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    if project_ids.is_empty() {
        return Ok(());
    }

    let owned: HashSet<i32> = projects::Entity::find()
        .filter(projects::Column::UserId.eq(user_id))
        .filter(projects::Column::Id.is_in(project_ids.clone()))
        .all(txn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let mut rows = Vec::with_capacity(project_ids.len());
    for project_id in project_ids {
        if !owned.contains(&project_id) {
            return Err(ApiError::NotFound(format!("Project {project_id} not found")));
        }
        rows.push(portfolio_projects::ActiveModel {
            portfolio_id: Set(portfolio_id),
            project_id: Set(project_id),
            ..Default::default()
        });
    }

    portfolio_projects::Entity::insert_many(rows).exec(txn).await?;

    Ok(())
}

async fn project_summaries(
    db: &DatabaseConnection,
    portfolio_id: i32,
) -> Result<Vec<PortfolioProjectSummary>, DbErr> {
    let refs = portfolio_projects::Entity::find()
        .filter(portfolio_projects::Column::PortfolioId.eq(portfolio_id))
        .all(db)
        .await?;

    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = refs.iter().map(|r| r.project_id).collect();

    let rows = projects::Entity::find()
        .filter(projects::Column::Id.is_in(ids.clone()))
        .order_by_desc(projects::Column::StartDate)
        .all(db)
        .await?;

    let mut stack_refs: HashMap<i32, Vec<ProjectStackRef>> = HashMap::new();
    for row in project_stacks::Entity::find()
        .filter(project_stacks::Column::ProjectId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        stack_refs
            .entry(row.project_id)
            .or_default()
            .push(ProjectStackRef {
                stack_id: row.stack_id,
                stack_name: row.stack_name,
            });
    }

    // The first content section doubles as the project description.
    let mut descriptions: HashMap<i32, String> = HashMap::new();
    for row in project_contents::Entity::find()
        .filter(project_contents::Column::ProjectId.is_in(ids.clone()))
        .order_by_asc(project_contents::Column::Id)
        .all(db)
        .await?
    {
        descriptions.entry(row.project_id).or_insert(row.content);
    }

    // The first link tagged "github" becomes the repository URL.
    let mut github_urls: HashMap<i32, String> = HashMap::new();
    for row in project_links::Entity::find()
        .filter(project_links::Column::ProjectId.is_in(ids))
        .filter(project_links::Column::LinkSite.eq("github"))
        .order_by_asc(project_links::Column::Id)
        .all(db)
        .await?
    {
        github_urls.entry(row.project_id).or_insert(row.url);
    }

    Ok(rows
        .into_iter()
        .map(|project| {
            let id = project.id;
            PortfolioProjectSummary {
                project_id: id,
                title: project.title,
                thumbnail: project.thumbnail,
                role: project.role,
                start_date: project.start_date,
                end_date: project.end_date,
                description: descriptions.remove(&id),
                stacks: stack_refs.remove(&id).unwrap_or_default(),
                github_url: github_urls.remove(&id),
            }
        })
        .collect())
}
