use sea_orm::*;
use std::collections::HashMap;

use crate::models::portfolio_projects;
use crate::models::projects::{self, CreateProject, ProjectResponse, UpdateProject};
use crate::models::{
    project_contents, project_images, project_links, project_stacks, project_tags,
};

/// Insert a new project and all of its child collections in one transaction.
pub async fn insert_project(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreateProject,
) -> Result<projects::Model, DbErr> {
    let txn = db.begin().await?;

    let project = projects::ActiveModel {
        user_id: Set(user_id),
        title: Set(input.title),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        role: Set(input.role),
        thumbnail: Set(input.thumbnail),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(tags) = input.tags {
        if !tags.is_empty() {
            let rows = tags.into_iter().map(|content| project_tags::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(user_id),
                content: Set(content),
                ..Default::default()
            });
            project_tags::Entity::insert_many(rows).exec(&txn).await?;
        }
    }

    if let Some(stacks) = input.stacks {
        if !stacks.is_empty() {
            let rows = stacks.into_iter().map(|s| project_stacks::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(user_id),
                stack_id: Set(s.stack_id),
                stack_name: Set(s.stack_name),
                ..Default::default()
            });
            project_stacks::Entity::insert_many(rows).exec(&txn).await?;
        }
    }

    if let Some(contents) = input.contents {
        if !contents.is_empty() {
            let rows = contents.into_iter().map(|c| project_contents::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(user_id),
                title: Set(c.title),
                content: Set(c.content),
                ..Default::default()
            });
            project_contents::Entity::insert_many(rows).exec(&txn).await?;
        }
    }

    if let Some(images) = input.images {
        if !images.is_empty() {
            let rows = images.into_iter().map(|image_url| project_images::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(user_id),
                image_url: Set(image_url),
                ..Default::default()
            });
            project_images::Entity::insert_many(rows).exec(&txn).await?;
        }
    }

    if let Some(links) = input.links {
        if !links.is_empty() {
            let rows = links.into_iter().map(|l| project_links::ActiveModel {
                project_id: Set(project.id),
                user_id: Set(user_id),
                name: Set(l.name),
                url: Set(l.url),
                link_site: Set(l.link_site),
                ..Default::default()
            });
            project_links::Entity::insert_many(rows).exec(&txn).await?;
        }
    }

    txn.commit().await?;

    Ok(project)
}

/// Fetch all projects for a user with their child collections, most recent
/// start date first. Each child table is loaded in one query and grouped in
/// memory.
pub async fn get_projects_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<ProjectResponse>, DbErr> {
    let rows = projects::Entity::find()
        .filter(projects::Column::UserId.eq(user_id))
        .order_by_desc(projects::Column::StartDate)
        .all(db)
        .await?;

    attach_children(db, rows).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Assemble the full response for an already-fetched project.
pub async fn get_project_with_children(
    db: &DatabaseConnection,
    project: projects::Model,
) -> Result<ProjectResponse, DbErr> {
    attach_children(db, vec![project])
        .await?
        .pop()
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))
}

async fn attach_children(
    db: &DatabaseConnection,
    rows: Vec<projects::Model>,
) -> Result<Vec<ProjectResponse>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();

    let mut tags: HashMap<i32, Vec<project_tags::Model>> = HashMap::new();
    for row in project_tags::Entity::find()
        .filter(project_tags::Column::ProjectId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        tags.entry(row.project_id).or_default().push(row);
    }

    let mut stacks: HashMap<i32, Vec<project_stacks::Model>> = HashMap::new();
    for row in project_stacks::Entity::find()
        .filter(project_stacks::Column::ProjectId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        stacks.entry(row.project_id).or_default().push(row);
    }

    let mut contents: HashMap<i32, Vec<project_contents::Model>> = HashMap::new();
    for row in project_contents::Entity::find()
        .filter(project_contents::Column::ProjectId.is_in(ids.clone()))
        .order_by_asc(project_contents::Column::Id)
        .all(db)
        .await?
    {
        contents.entry(row.project_id).or_default().push(row);
    }

    let mut images: HashMap<i32, Vec<project_images::Model>> = HashMap::new();
    for row in project_images::Entity::find()
        .filter(project_images::Column::ProjectId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        images.entry(row.project_id).or_default().push(row);
    }

    let mut links: HashMap<i32, Vec<project_links::Model>> = HashMap::new();
    for row in project_links::Entity::find()
        .filter(project_links::Column::ProjectId.is_in(ids))
        .all(db)
        .await?
    {
        links.entry(row.project_id).or_default().push(row);
    }

    Ok(rows
        .into_iter()
        .map(|project| {
            let id = project.id;
            ProjectResponse {
                project,
                tags: tags.remove(&id).unwrap_or_default(),
                stacks: stacks.remove(&id).unwrap_or_default(),
                contents: contents.remove(&id).unwrap_or_default(),
                images: images.remove(&id).unwrap_or_default(),
                links: links.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

/// Update a project's scalar fields (partial). The caller is responsible
/// for the ownership check.
pub async fn update_project(
    db: &DatabaseConnection,
    project: projects::Model,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(start_date) = input.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(Some(end_date));
    }
    if let Some(role) = input.role {
        active.role = Set(Some(role));
    }
    if let Some(thumbnail) = input.thumbnail {
        active.thumbnail = Set(Some(thumbnail));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project, detaching portfolio references and removing the child
/// collections in the same transaction.
pub async fn delete_project(db: &DatabaseConnection, id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    portfolio_projects::Entity::delete_many()
        .filter(portfolio_projects::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;

    project_tags::Entity::delete_many()
        .filter(project_tags::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project_stacks::Entity::delete_many()
        .filter(project_stacks::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project_contents::Entity::delete_many()
        .filter(project_contents::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project_images::Entity::delete_many()
        .filter(project_images::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;
    project_links::Entity::delete_many()
        .filter(project_links::Column::ProjectId.eq(id))
        .exec(&txn)
        .await?;

    projects::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await
}
