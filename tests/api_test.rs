//! Integration tests for the persistence layer, run against a fresh
//! in-memory SQLite database with the full migration set applied.
//!
//! Run with: `cargo test --test api_test`
use chrono::{TimeZone, Utc};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter,
};

use migration::{Migrator, MigratorTrait};
use portfolio_backend::auth::authorization;
use portfolio_backend::db::{
    careers as career_db, likes as like_db, licenses as license_db, portfolios as portfolio_db,
    projects as project_db, stacks as stack_db, user_links as link_db, users as user_db,
};
use portfolio_backend::error::ApiError;
use portfolio_backend::models::careers::{CareerItem, UpdateCareer};
use portfolio_backend::models::licenses::LicenseItem;
use portfolio_backend::models::portfolios::{
    AboutSection, CareerInput, CreatePortfolio, SearchQuery, SkillInput, SortBy, Template,
    UpdatePortfolio, Visibility,
};
use portfolio_backend::models::projects::{
    CreateProject, ProjectContentInput, ProjectLinkInput, ProjectStackInput, UpdateProject,
};
use portfolio_backend::models::stacks::{StackItem, UpdateStack};
use portfolio_backend::models::user_links::{CreateUserLink, UpdateUserLink};
use portfolio_backend::models::users::{RegisterRequest, UpdateMyInfo};
use portfolio_backend::models::{
    portfolio_careers, portfolio_likes, portfolio_projects, portfolio_stacks, project_contents,
    project_links, users,
};

/// Open a fresh in-memory database with the full schema applied. The pool
/// is pinned to one connection, otherwise every pooled connection would
/// see its own empty in-memory database.
async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

async fn seed_user(db: &DatabaseConnection, username: &str) -> users::Model {
    let input = RegisterRequest {
        username: username.to_string(),
        password: "password123".to_string(),
        name: username.to_string(),
        email: Some(format!("{username}@example.com")),
        phone_number: None,
        introduction: None,
        job: None,
    };

    user_db::insert_user(db, input, "$2b$12$not-a-real-hash".to_string())
        .await
        .expect("Failed to insert user")
}

fn date(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn stack_item(name: &str, level: &str) -> StackItem {
    StackItem {
        name: name.to_string(),
        level: Some(level.to_string()),
    }
}

fn career_item(
    content: &str,
    start: chrono::DateTime<Utc>,
    end: Option<chrono::DateTime<Utc>>,
) -> CareerItem {
    CareerItem {
        content: content.to_string(),
        start_date: start,
        end_date: end,
    }
}

fn portfolio_input(title: &str) -> CreatePortfolio {
    CreatePortfolio {
        title: title.to_string(),
        template: Template::Standard,
        visibility: Visibility::Public,
        greeting: None,
        introduction: None,
        about_me: None,
        thumbnail: None,
        cover_image: None,
        skills: None,
        careers: None,
        project_ids: None,
    }
}

fn update_input() -> UpdatePortfolio {
    UpdatePortfolio {
        title: None,
        template: None,
        visibility: None,
        greeting: None,
        introduction: None,
        about_me: None,
        thumbnail: None,
        cover_image: None,
        skills: None,
        careers: None,
        project_ids: None,
    }
}

fn project_input(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        start_date: date(2024, 1, 1),
        end_date: None,
        role: None,
        thumbnail: None,
        tags: None,
        stacks: None,
        contents: None,
        images: None,
        links: None,
    }
}

fn search_query(keyword: Option<&str>) -> SearchQuery {
    SearchQuery {
        keyword: keyword.map(str::to_string),
        sort: SortBy::Recent,
        template: None,
        visibility: None,
    }
}

// ── users ──

#[tokio::test]
async fn register_and_lookup_users() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    assert!(user_db::username_exists(&db, "alice").await.unwrap());
    assert!(!user_db::username_exists(&db, "bob").await.unwrap());
    assert!(user_db::email_exists(&db, "alice@example.com").await.unwrap());
    assert!(!user_db::email_exists(&db, "bob@example.com").await.unwrap());

    let found = user_db::get_user_by_username(&db, "alice")
        .await
        .unwrap()
        .expect("alice should exist");
    assert_eq!(found.id, alice.id);
    assert!(found.updated_at.is_none());

    let updated = user_db::update_my_info(
        &db,
        alice.id,
        UpdateMyInfo {
            name: Some("Alice Park".to_string()),
            email: None,
            phone_number: None,
            introduction: Some("Backend developer".to_string()),
            job: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Alice Park");
    assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
    assert_eq!(updated.introduction.as_deref(), Some("Backend developer"));
    assert!(updated.updated_at.is_some());
}

// ── stacks and careers ──

#[tokio::test]
async fn replace_stacks_swaps_whole_list() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let first = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Go", "Advanced"), stack_item("Rust", "Intermediate")],
    )
    .await
    .unwrap();
    assert_eq!(first.len(), 2);

    let listed = stack_db::get_stacks_by_user(&db, alice.id).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Go", "Rust"]);

    let second = stack_db::replace_stacks(&db, alice.id, vec![stack_item("TypeScript", "Beginner")])
        .await
        .unwrap();
    assert_eq!(second.len(), 1);

    let listed = stack_db::get_stacks_by_user(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "TypeScript");

    stack_db::replace_stacks(&db, alice.id, vec![]).await.unwrap();
    assert!(stack_db::get_stacks_by_user(&db, alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_stacks_rejects_duplicate_names() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    stack_db::replace_stacks(&db, alice.id, vec![stack_item("Go", "Advanced")])
        .await
        .unwrap();

    let err = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Rust", "Advanced"), stack_item("Rust", "Beginner")],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // The rejected replace never touched the table.
    let listed = stack_db::get_stacks_by_user(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Go");
}

#[tokio::test]
async fn name_taken_excludes_row_being_renamed() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Go", "Advanced"), stack_item("Rust", "Intermediate")],
    )
    .await
    .unwrap();
    let go = stacks.iter().find(|s| s.name == "Go").unwrap();
    let rust = stacks.iter().find(|s| s.name == "Rust").unwrap();

    // Renaming Go to Rust would collide with the existing Rust row.
    assert!(stack_db::name_taken(&db, alice.id, "Rust", go.id).await.unwrap());
    // Re-saving Rust under its own name is not a collision.
    assert!(!stack_db::name_taken(&db, alice.id, "Rust", rust.id).await.unwrap());
    assert!(!stack_db::name_taken(&db, alice.id, "Python", go.id).await.unwrap());
}

#[tokio::test]
async fn career_replace_and_update() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let created = career_db::replace_careers(
        &db,
        alice.id,
        vec![
            career_item("Acme Corp", date(2020, 1, 1), Some(date(2022, 12, 31))),
            career_item("Globex", date(2023, 2, 1), None),
        ],
    )
    .await
    .unwrap();
    assert_eq!(created.len(), 2);

    // Most recent start date first.
    let listed = career_db::get_careers_by_user(&db, alice.id).await.unwrap();
    let contents: Vec<&str> = listed.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["Globex", "Acme Corp"]);

    let acme = created.iter().find(|c| c.content == "Acme Corp").unwrap().clone();
    let updated = career_db::update_career(
        &db,
        acme,
        UpdateCareer {
            content: Some("Acme Corporation".to_string()),
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.content, "Acme Corporation");
    assert_eq!(updated.start_date, date(2020, 1, 1));
    assert_eq!(updated.end_date, Some(date(2022, 12, 31)));
}

// ── profile links ──

#[tokio::test]
async fn link_crud_and_owner_guard() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let github = link_db::insert_link(
        &db,
        alice.id,
        CreateUserLink {
            name: "GitHub".to_string(),
            url: "https://github.com/alice".to_string(),
            link_site: Some("github".to_string()),
        },
    )
    .await
    .unwrap();
    let blog = link_db::insert_link(
        &db,
        alice.id,
        CreateUserLink {
            name: "Blog".to_string(),
            url: "https://alice.example.com".to_string(),
            link_site: None,
        },
    )
    .await
    .unwrap();

    let listed = link_db::get_links_by_user(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, github.id);

    let updated = link_db::update_link(
        &db,
        blog.clone(),
        UpdateUserLink {
            name: None,
            url: Some("https://blog.alice.example.com".to_string()),
            link_site: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.url, "https://blog.alice.example.com");
    assert_eq!(updated.name, "Blog");

    let err = authorization::verify_link_owner(&db, blog.id, bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert!(authorization::verify_link_owner(&db, blog.id, alice.id).await.is_ok());

    link_db::delete_link(&db, github.id).await.unwrap();
    let listed = link_db::get_links_by_user(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, blog.id);
}

// ── portfolio creation and snapshots ──

#[tokio::test]
async fn create_portfolio_builds_snapshots() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Go", "Advanced"), stack_item("Rust", "Intermediate")],
    )
    .await
    .unwrap();
    let go = stacks.iter().find(|s| s.name == "Go").unwrap();
    let rust = stacks.iter().find(|s| s.name == "Rust").unwrap();

    let careers = career_db::replace_careers(
        &db,
        alice.id,
        vec![career_item("Acme Corp", date(2020, 1, 1), Some(date(2022, 12, 31)))],
    )
    .await
    .unwrap();

    let about = vec![AboutSection {
        title: "Background".to_string(),
        content: "Started in embedded systems".to_string(),
    }];

    let mut input = portfolio_input("Backend portfolio");
    input.greeting = Some("Hello".to_string());
    input.introduction = Some("Systems work".to_string());
    input.about_me = Some(about.clone());
    // Input order deliberately reversed; rank decides the rendered order.
    input.skills = Some(vec![
        SkillInput { id: rust.id, rank: 2 },
        SkillInput { id: go.id, rank: 1 },
    ]);
    input.careers = Some(vec![CareerInput {
        id: careers[0].id,
        description: "Led the API team".to_string(),
    }]);

    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    assert_eq!(portfolio.views, 0);
    assert_eq!(portfolio.likes_count, 0);

    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();

    assert_eq!(detail.stacks.len(), 2);
    assert_eq!(detail.stacks[0].name, "Go");
    assert_eq!(detail.stacks[0].level.as_deref(), Some("Advanced"));
    assert_eq!(detail.stacks[0].rank, 1);
    assert_eq!(detail.stacks[0].stack_id, go.id);
    assert_eq!(detail.stacks[1].name, "Rust");
    assert_eq!(detail.stacks[1].rank, 2);

    assert_eq!(detail.careers.len(), 1);
    assert_eq!(detail.careers[0].content, "Acme Corp");
    assert_eq!(detail.careers[0].start_date, date(2020, 1, 1));
    assert_eq!(detail.careers[0].end_date, Some(date(2022, 12, 31)));
    assert_eq!(detail.careers[0].description.as_deref(), Some("Led the API team"));

    assert_eq!(detail.summary.about_me, Some(about));
    assert_eq!(detail.summary.user_name.as_deref(), Some("alice"));
    assert_eq!(detail.summary.is_liked, None);
}

#[tokio::test]
async fn snapshot_survives_source_edit() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(&db, alice.id, vec![stack_item("Go", "Advanced")])
        .await
        .unwrap();
    let careers = career_db::replace_careers(
        &db,
        alice.id,
        vec![career_item("Acme Corp", date(2020, 1, 1), None)],
    )
    .await
    .unwrap();

    let mut input = portfolio_input("Snapshot check");
    input.skills = Some(vec![SkillInput { id: stacks[0].id, rank: 1 }]);
    input.careers = Some(vec![CareerInput {
        id: careers[0].id,
        description: "API work".to_string(),
    }]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    // Edit the sources after the snapshot was taken.
    stack_db::update_stack(
        &db,
        stacks[0].clone(),
        UpdateStack {
            name: Some("Golang".to_string()),
            level: Some("Expert".to_string()),
        },
    )
    .await
    .unwrap();
    career_db::update_career(
        &db,
        careers[0].clone(),
        UpdateCareer {
            content: Some("Acme Corporation".to_string()),
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();

    let sources = stack_db::get_stacks_by_user(&db, alice.id).await.unwrap();
    assert_eq!(sources[0].name, "Golang");

    // The portfolio still shows the values captured at attach time.
    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert_eq!(detail.stacks[0].name, "Go");
    assert_eq!(detail.stacks[0].level.as_deref(), Some("Advanced"));
    assert_eq!(detail.careers[0].content, "Acme Corp");
}

#[tokio::test]
async fn stack_delete_detaches_snapshot() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(&db, alice.id, vec![stack_item("Go", "Advanced")])
        .await
        .unwrap();

    let mut input = portfolio_input("Stack detach");
    input.skills = Some(vec![SkillInput { id: stacks[0].id, rank: 1 }]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    let portfolio_id = portfolio.id;

    stack_db::delete_stack(&db, stacks[0].id).await.unwrap();

    let portfolio = portfolio_db::get_portfolio_by_id(&db, portfolio_id)
        .await
        .unwrap()
        .expect("portfolio should survive the stack deletion");
    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert!(detail.stacks.is_empty());
}

#[tokio::test]
async fn career_delete_detaches_only_its_snapshot() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let careers = career_db::replace_careers(
        &db,
        alice.id,
        vec![
            career_item("Acme Corp", date(2020, 1, 1), None),
            career_item("Globex", date(2023, 2, 1), None),
        ],
    )
    .await
    .unwrap();
    let acme = careers.iter().find(|c| c.content == "Acme Corp").unwrap();
    let globex = careers.iter().find(|c| c.content == "Globex").unwrap();

    let mut input = portfolio_input("Career detach");
    input.careers = Some(vec![
        CareerInput { id: acme.id, description: "API team".to_string() },
        CareerInput { id: globex.id, description: "Platform team".to_string() },
    ]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    let portfolio_id = portfolio.id;

    career_db::delete_career(&db, acme.id).await.unwrap();

    let portfolio = portfolio_db::get_portfolio_by_id(&db, portfolio_id)
        .await
        .unwrap()
        .unwrap();
    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert_eq!(detail.careers.len(), 1);
    assert_eq!(detail.careers[0].career_id, globex.id);
}

#[tokio::test]
async fn bulk_replace_detaches_all_snapshots() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Go", "Advanced"), stack_item("Rust", "Intermediate")],
    )
    .await
    .unwrap();

    let mut input = portfolio_input("Bulk detach");
    input.skills = Some(vec![
        SkillInput { id: stacks[0].id, rank: 1 },
        SkillInput { id: stacks[1].id, rank: 2 },
    ]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    let portfolio_id = portfolio.id;

    // Replacing the source list severs every snapshot of the old rows.
    stack_db::replace_stacks(&db, alice.id, vec![stack_item("TypeScript", "Beginner")])
        .await
        .unwrap();

    let portfolio = portfolio_db::get_portfolio_by_id(&db, portfolio_id)
        .await
        .unwrap()
        .unwrap();
    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert!(detail.stacks.is_empty());
}

#[tokio::test]
async fn attach_rejects_foreign_ids() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let bob_stacks = stack_db::replace_stacks(&db, bob.id, vec![stack_item("Python", "Advanced")])
        .await
        .unwrap();
    let bob_project = project_db::insert_project(&db, bob.id, project_input("Bob's project"))
        .await
        .unwrap();

    let mut input = portfolio_input("Borrowed stack");
    input.skills = Some(vec![SkillInput { id: bob_stacks[0].id, rank: 1 }]);
    let err = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let mut input = portfolio_input("Borrowed project");
    input.project_ids = Some(vec![bob_project.id]);
    let err = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // Both inserts rolled back whole.
    let mine = portfolio_db::get_portfolios_by_user(&db, alice.id, true)
        .await
        .unwrap();
    assert!(mine.is_empty());
}

#[tokio::test]
async fn duplicate_project_ids_collapse() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let project = project_db::insert_project(&db, alice.id, project_input("Pipeline"))
        .await
        .unwrap();

    let mut input = portfolio_input("Dedup check");
    input.project_ids = Some(vec![project.id, project.id]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    let refs = portfolio_projects::Entity::find()
        .filter(portfolio_projects::Column::PortfolioId.eq(portfolio.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(refs, 1);

    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert_eq!(detail.projects.len(), 1);
}

// ── portfolio update and delete ──

#[tokio::test]
async fn update_patches_scalars_and_replaces_lists() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let stacks = stack_db::replace_stacks(
        &db,
        alice.id,
        vec![stack_item("Go", "Advanced"), stack_item("Rust", "Intermediate")],
    )
    .await
    .unwrap();
    let careers = career_db::replace_careers(
        &db,
        alice.id,
        vec![career_item("Acme Corp", date(2020, 1, 1), None)],
    )
    .await
    .unwrap();

    let mut input = portfolio_input("Original title");
    input.introduction = Some("Telemetry pipelines".to_string());
    input.skills = Some(vec![
        SkillInput { id: stacks[0].id, rank: 1 },
        SkillInput { id: stacks[1].id, rank: 2 },
    ]);
    input.careers = Some(vec![CareerInput {
        id: careers[0].id,
        description: "API work".to_string(),
    }]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    // Scalar patch only: the relation lists are untouched.
    let mut patch = update_input();
    patch.title = Some("Renamed".to_string());
    patch.visibility = Some(Visibility::Link);
    let updated = portfolio_db::update_portfolio(&db, portfolio, patch).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.visibility, Visibility::Link);
    assert_eq!(updated.introduction.as_deref(), Some("Telemetry pipelines"));

    let detail = portfolio_db::get_portfolio_detail(&db, updated.clone(), None)
        .await
        .unwrap();
    assert_eq!(detail.stacks.len(), 2);
    assert_eq!(detail.careers.len(), 1);

    // A present list replaces the set wholesale.
    let mut patch = update_input();
    patch.skills = Some(vec![SkillInput { id: stacks[1].id, rank: 1 }]);
    let updated = portfolio_db::update_portfolio(&db, updated, patch).await.unwrap();

    let detail = portfolio_db::get_portfolio_detail(&db, updated.clone(), None)
        .await
        .unwrap();
    assert_eq!(detail.stacks.len(), 1);
    assert_eq!(detail.stacks[0].name, "Rust");
    assert_eq!(detail.careers.len(), 1);

    // An empty list clears the set.
    let mut patch = update_input();
    patch.skills = Some(vec![]);
    let updated = portfolio_db::update_portfolio(&db, updated, patch).await.unwrap();

    let detail = portfolio_db::get_portfolio_detail(&db, updated, None).await.unwrap();
    assert!(detail.stacks.is_empty());
    assert_eq!(detail.careers.len(), 1);
}

#[tokio::test]
async fn delete_portfolio_removes_joins_keeps_sources() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let stacks = stack_db::replace_stacks(&db, alice.id, vec![stack_item("Go", "Advanced")])
        .await
        .unwrap();
    let careers = career_db::replace_careers(
        &db,
        alice.id,
        vec![career_item("Acme Corp", date(2020, 1, 1), None)],
    )
    .await
    .unwrap();
    let project = project_db::insert_project(&db, alice.id, project_input("Pipeline"))
        .await
        .unwrap();

    let mut input = portfolio_input("Doomed");
    input.skills = Some(vec![SkillInput { id: stacks[0].id, rank: 1 }]);
    input.careers = Some(vec![CareerInput {
        id: careers[0].id,
        description: "API work".to_string(),
    }]);
    input.project_ids = Some(vec![project.id]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    let portfolio_id = portfolio.id;

    like_db::like_portfolio(&db, bob.id, portfolio_id).await.unwrap();

    portfolio_db::delete_portfolio(&db, portfolio_id).await.unwrap();

    assert!(
        portfolio_db::get_portfolio_by_id(&db, portfolio_id)
            .await
            .unwrap()
            .is_none()
    );

    let stack_rows = portfolio_stacks::Entity::find()
        .filter(portfolio_stacks::Column::PortfolioId.eq(portfolio_id))
        .count(&db)
        .await
        .unwrap();
    let career_rows = portfolio_careers::Entity::find()
        .filter(portfolio_careers::Column::PortfolioId.eq(portfolio_id))
        .count(&db)
        .await
        .unwrap();
    let project_rows = portfolio_projects::Entity::find()
        .filter(portfolio_projects::Column::PortfolioId.eq(portfolio_id))
        .count(&db)
        .await
        .unwrap();
    let like_rows = portfolio_likes::Entity::find()
        .filter(portfolio_likes::Column::PortfolioId.eq(portfolio_id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(stack_rows, 0);
    assert_eq!(career_rows, 0);
    assert_eq!(project_rows, 0);
    assert_eq!(like_rows, 0);

    // Sources are untouched.
    assert_eq!(stack_db::get_stacks_by_user(&db, alice.id).await.unwrap().len(), 1);
    assert_eq!(career_db::get_careers_by_user(&db, alice.id).await.unwrap().len(), 1);
    assert!(
        project_db::get_project_by_id(&db, project.id)
            .await
            .unwrap()
            .is_some()
    );
}

// ── access guards ──

#[tokio::test]
async fn owner_guard_distinguishes_missing_from_foreign() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("Mine"))
        .await
        .unwrap();

    let err = authorization::verify_portfolio_owner(&db, 9999, alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = authorization::verify_portfolio_owner(&db, portfolio.id, bob.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let found = authorization::verify_portfolio_owner(&db, portfolio.id, alice.id)
        .await
        .unwrap();
    assert_eq!(found.id, portfolio.id);

    let err = authorization::verify_career_owner(&db, 9999, alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn visibility_guard_hides_private_portfolios() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let mut input = portfolio_input("Private notes");
    input.visibility = Visibility::Private;
    let private = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    let mut input = portfolio_input("Shared by link");
    input.visibility = Visibility::Link;
    let linked = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    let err = authorization::verify_portfolio_visible(&db, private.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    let err = authorization::verify_portfolio_visible(&db, private.id, Some(bob.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert!(
        authorization::verify_portfolio_visible(&db, private.id, Some(alice.id))
            .await
            .is_ok()
    );

    // Link visibility is reachable by anyone who has the id.
    assert!(authorization::verify_portfolio_visible(&db, linked.id, None).await.is_ok());
    assert!(
        authorization::verify_portfolio_visible(&db, linked.id, Some(bob.id))
            .await
            .is_ok()
    );

    let err = authorization::verify_portfolio_visible(&db, 9999, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn user_listing_respects_visibility() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("Public one"))
        .await
        .unwrap();
    let mut input = portfolio_input("Private one");
    input.visibility = Visibility::Private;
    portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    let mut input = portfolio_input("Link one");
    input.visibility = Visibility::Link;
    portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    // The owner sees everything, newest first.
    let own = portfolio_db::get_portfolios_by_user(&db, alice.id, true)
        .await
        .unwrap();
    let titles: Vec<&str> = own.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Link one", "Private one", "Public one"]);

    // Everyone else sees only the public ones.
    let public = portfolio_db::get_portfolios_by_user(&db, alice.id, false)
        .await
        .unwrap();
    let titles: Vec<&str> = public.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Public one"]);
}

// ── likes ──

#[tokio::test]
async fn like_unlike_flow_maintains_counter() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("Likeable"))
        .await
        .unwrap();
    let id = portfolio.id;

    like_db::like_portfolio(&db, bob.id, id).await.unwrap();
    let current = portfolio_db::get_portfolio_by_id(&db, id).await.unwrap().unwrap();
    assert_eq!(current.likes_count, 1);

    let err = like_db::like_portfolio(&db, bob.id, id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    like_db::like_portfolio(&db, alice.id, id).await.unwrap();
    let current = portfolio_db::get_portfolio_by_id(&db, id).await.unwrap().unwrap();
    assert_eq!(current.likes_count, 2);

    assert!(like_db::is_liked(&db, bob.id, id).await.unwrap());

    like_db::unlike_portfolio(&db, bob.id, id).await.unwrap();
    let current = portfolio_db::get_portfolio_by_id(&db, id).await.unwrap().unwrap();
    assert_eq!(current.likes_count, 1);
    assert!(!like_db::is_liked(&db, bob.id, id).await.unwrap());

    let err = like_db::unlike_portfolio(&db, bob.id, id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    let err = like_db::like_portfolio(&db, bob.id, 9999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    let err = like_db::unlike_portfolio(&db, bob.id, 9999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // The detail view annotates likes for a known viewer only.
    let current = portfolio_db::get_portfolio_by_id(&db, id).await.unwrap().unwrap();
    let detail = portfolio_db::get_portfolio_detail(&db, current.clone(), Some(alice.id))
        .await
        .unwrap();
    assert_eq!(detail.summary.is_liked, Some(true));
    let detail = portfolio_db::get_portfolio_detail(&db, current.clone(), Some(bob.id))
        .await
        .unwrap();
    assert_eq!(detail.summary.is_liked, Some(false));
    let detail = portfolio_db::get_portfolio_detail(&db, current, None).await.unwrap();
    assert_eq!(detail.summary.is_liked, None);
}

// ── search, recommend, requirements ──

#[tokio::test]
async fn search_matches_keyword_and_visibility() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let mut input = portfolio_input("Rust backend showcase");
    let by_title = portfolio_db::insert_portfolio(&db, alice.id, input.clone())
        .await
        .unwrap();

    input = portfolio_input("Greeting match");
    input.greeting = Some("Building with Rust daily".to_string());
    let by_greeting = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    input = portfolio_input("Introduction match");
    input.introduction = Some("Rust and distributed systems".to_string());
    let by_intro = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    input = portfolio_input("Frontend playground");
    input.template = Template::Image;
    portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    input = portfolio_input("Rust secrets");
    input.visibility = Visibility::Private;
    let private = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    input = portfolio_input("Rust by link");
    input.visibility = Visibility::Link;
    portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    // Keyword matches title, greeting or introduction; only public rows.
    let results = portfolio_db::search_portfolios(&db, search_query(Some("Rust")), None)
        .await
        .unwrap();
    let ids: Vec<i32> = results.iter().map(|p| p.portfolio_id).collect();
    assert_eq!(results.len(), 3);
    assert!(ids.contains(&by_title.id));
    assert!(ids.contains(&by_greeting.id));
    assert!(ids.contains(&by_intro.id));

    // No keyword lists all public rows; link and private stay hidden.
    let results = portfolio_db::search_portfolios(&db, search_query(None), None)
        .await
        .unwrap();
    assert_eq!(results.len(), 4);

    // An empty keyword is treated as absent.
    let results = portfolio_db::search_portfolios(&db, search_query(Some("")), None)
        .await
        .unwrap();
    assert_eq!(results.len(), 4);

    // Asking for private rows explicitly surfaces them.
    let mut query = search_query(Some("Rust"));
    query.visibility = Some(Visibility::Private);
    let results = portfolio_db::search_portfolios(&db, query, None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].portfolio_id, private.id);

    // Template narrows the match.
    let mut query = search_query(None);
    query.template = Some(Template::Image);
    let results = portfolio_db::search_portfolios(&db, query, None).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Frontend playground");
}

#[tokio::test]
async fn search_sort_orders() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;
    let carol = seed_user(&db, "carol").await;

    let p1 = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("First"))
        .await
        .unwrap();
    let p2 = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("Second"))
        .await
        .unwrap();
    let p3 = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input("Third"))
        .await
        .unwrap();

    for _ in 0..5 {
        portfolio_db::increment_views(&db, p1.id).await.unwrap();
    }
    for _ in 0..2 {
        portfolio_db::increment_views(&db, p2.id).await.unwrap();
    }

    like_db::like_portfolio(&db, bob.id, p3.id).await.unwrap();
    like_db::like_portfolio(&db, carol.id, p3.id).await.unwrap();
    like_db::like_portfolio(&db, bob.id, p2.id).await.unwrap();

    let results = portfolio_db::search_portfolios(&db, search_query(None), None)
        .await
        .unwrap();
    let ids: Vec<i32> = results.iter().map(|p| p.portfolio_id).collect();
    assert_eq!(ids, vec![p3.id, p2.id, p1.id]);

    let mut query = search_query(None);
    query.sort = SortBy::Views;
    let results = portfolio_db::search_portfolios(&db, query, None).await.unwrap();
    let ids: Vec<i32> = results.iter().map(|p| p.portfolio_id).collect();
    assert_eq!(ids, vec![p1.id, p2.id, p3.id]);
    assert_eq!(results[0].views, 5);

    let mut query = search_query(None);
    query.sort = SortBy::Likes;
    let results = portfolio_db::search_portfolios(&db, query, None).await.unwrap();
    let ids: Vec<i32> = results.iter().map(|p| p.portfolio_id).collect();
    assert_eq!(ids, vec![p3.id, p2.id, p1.id]);
    assert_eq!(results[0].likes_count, 2);

    // Anonymous searches carry no like annotations; a signed-in viewer
    // gets one on every row.
    assert!(results.iter().all(|p| p.is_liked.is_none()));

    let mut query = search_query(None);
    query.sort = SortBy::Likes;
    let results = portfolio_db::search_portfolios(&db, query, Some(bob.id))
        .await
        .unwrap();
    assert_eq!(results[0].is_liked, Some(true));
    assert_eq!(results[1].is_liked, Some(true));
    assert_eq!(results[2].is_liked, Some(false));
}

#[tokio::test]
async fn recommend_returns_top_ten_public() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let mut created = Vec::new();
    for i in 0..12 {
        let p = portfolio_db::insert_portfolio(&db, alice.id, portfolio_input(&format!("Portfolio {i}")))
            .await
            .unwrap();
        created.push(p);
    }

    // A heavily viewed private portfolio must never be recommended.
    let mut input = portfolio_input("Private hit");
    input.visibility = Visibility::Private;
    let private = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();
    for _ in 0..9 {
        portfolio_db::increment_views(&db, private.id).await.unwrap();
    }

    for _ in 0..3 {
        portfolio_db::increment_views(&db, created[11].id).await.unwrap();
    }
    for _ in 0..2 {
        portfolio_db::increment_views(&db, created[10].id).await.unwrap();
    }

    let results = portfolio_db::recommend_portfolios(&db, None).await.unwrap();
    assert_eq!(results.len(), 10);

    let ids: Vec<i32> = results.iter().map(|p| p.portfolio_id).collect();
    assert_eq!(ids[0], created[11].id);
    assert_eq!(ids[1], created[10].id);
    assert!(!ids.contains(&private.id));
    // The two oldest zero-view portfolios fall off the end.
    assert!(!ids.contains(&created[0].id));
    assert!(!ids.contains(&created[1].id));
}

#[tokio::test]
async fn check_requirements_progression() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let flags = portfolio_db::check_requirements(&db, alice.id).await.unwrap();
    assert!(!flags.career && !flags.stack && !flags.project && !flags.job);

    stack_db::replace_stacks(&db, alice.id, vec![stack_item("Go", "Advanced")])
        .await
        .unwrap();
    let flags = portfolio_db::check_requirements(&db, alice.id).await.unwrap();
    assert!(flags.stack);
    assert!(!flags.career && !flags.project && !flags.job);

    career_db::replace_careers(
        &db,
        alice.id,
        vec![career_item("Acme Corp", date(2020, 1, 1), None)],
    )
    .await
    .unwrap();
    project_db::insert_project(&db, alice.id, project_input("Pipeline"))
        .await
        .unwrap();
    user_db::update_my_info(
        &db,
        alice.id,
        UpdateMyInfo {
            name: None,
            email: None,
            phone_number: None,
            introduction: None,
            job: Some("Platform Engineer".to_string()),
        },
    )
    .await
    .unwrap();

    let flags = portfolio_db::check_requirements(&db, alice.id).await.unwrap();
    assert!(flags.career && flags.stack && flags.project && flags.job);
}

// ── projects ──

#[tokio::test]
async fn project_lifecycle_with_children() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    let mut input = project_input("Telemetry pipeline");
    input.role = Some("Backend".to_string());
    input.tags = Some(vec!["backend".to_string(), "cli".to_string()]);
    input.stacks = Some(vec![ProjectStackInput {
        stack_id: 1,
        stack_name: "Go".to_string(),
    }]);
    input.contents = Some(vec![
        ProjectContentInput {
            title: "Overview".to_string(),
            content: "A data pipeline for telemetry".to_string(),
        },
        ProjectContentInput {
            title: "Design".to_string(),
            content: "Batch ingestion with backpressure".to_string(),
        },
    ]);
    input.images = Some(vec!["https://img.example.com/1.png".to_string()]);
    input.links = Some(vec![
        ProjectLinkInput {
            name: "Repository".to_string(),
            url: "https://github.com/alice/pipeline".to_string(),
            link_site: Some("github".to_string()),
        },
        ProjectLinkInput {
            name: "Writeup".to_string(),
            url: "https://alice.example.com/pipeline".to_string(),
            link_site: None,
        },
    ]);

    let project = project_db::insert_project(&db, alice.id, input).await.unwrap();

    let listed = project_db::get_projects_by_user(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    let full = &listed[0];
    assert_eq!(full.project.id, project.id);
    assert_eq!(full.tags.len(), 2);
    assert_eq!(full.stacks.len(), 1);
    assert_eq!(full.contents.len(), 2);
    assert_eq!(full.contents[0].title, "Overview");
    assert_eq!(full.images.len(), 1);
    assert_eq!(full.links.len(), 2);

    let updated = project_db::update_project(
        &db,
        project.clone(),
        UpdateProject {
            title: Some("Telemetry pipeline v2".to_string()),
            start_date: None,
            end_date: None,
            role: None,
            thumbnail: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Telemetry pipeline v2");
    assert_eq!(updated.role.as_deref(), Some("Backend"));
    assert!(updated.updated_at.is_some());

    // Attach to a portfolio, then delete the project out from under it.
    let mut pinput = portfolio_input("Showcase");
    pinput.project_ids = Some(vec![project.id]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, pinput).await.unwrap();
    let portfolio_id = portfolio.id;

    project_db::delete_project(&db, project.id).await.unwrap();

    assert!(
        project_db::get_project_by_id(&db, project.id)
            .await
            .unwrap()
            .is_none()
    );
    let content_rows = project_contents::Entity::find()
        .filter(project_contents::Column::ProjectId.eq(project.id))
        .count(&db)
        .await
        .unwrap();
    let link_rows = project_links::Entity::find()
        .filter(project_links::Column::ProjectId.eq(project.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(content_rows, 0);
    assert_eq!(link_rows, 0);

    let portfolio = portfolio_db::get_portfolio_by_id(&db, portfolio_id)
        .await
        .unwrap()
        .unwrap();
    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();
    assert!(detail.projects.is_empty());
}

#[tokio::test]
async fn detail_summarizes_attached_projects() {
    let db = setup().await;
    let alice = seed_user(&db, "alice").await;

    license_db::replace_licenses(
        &db,
        alice.id,
        vec![
            LicenseItem {
                name: "CKA".to_string(),
                got_date: date(2023, 6, 1),
                end_date: Some(date(2026, 6, 1)),
            },
            LicenseItem {
                name: "AWS SAA".to_string(),
                got_date: date(2024, 3, 1),
                end_date: None,
            },
        ],
    )
    .await
    .unwrap();

    let mut older = project_input("Older project");
    older.start_date = date(2023, 1, 1);
    older.contents = Some(vec![ProjectContentInput {
        title: "Overview".to_string(),
        content: "A data pipeline for telemetry".to_string(),
    }]);
    older.links = Some(vec![ProjectLinkInput {
        name: "Repository".to_string(),
        url: "https://github.com/alice/older".to_string(),
        link_site: Some("github".to_string()),
    }]);
    older.stacks = Some(vec![ProjectStackInput {
        stack_id: 7,
        stack_name: "Go".to_string(),
    }]);
    let older = project_db::insert_project(&db, alice.id, older).await.unwrap();

    let mut newer = project_input("Newer project");
    newer.start_date = date(2024, 5, 1);
    let newer = project_db::insert_project(&db, alice.id, newer).await.unwrap();

    let mut input = portfolio_input("Showcase");
    input.project_ids = Some(vec![older.id, newer.id]);
    let portfolio = portfolio_db::insert_portfolio(&db, alice.id, input).await.unwrap();

    let detail = portfolio_db::get_portfolio_detail(&db, portfolio, None)
        .await
        .unwrap();

    // Licenses come straight from the owner's profile, newest first.
    assert_eq!(detail.licenses.len(), 2);
    assert_eq!(detail.licenses[0].name, "AWS SAA");

    // Projects ordered by start date, newest first.
    assert_eq!(detail.projects.len(), 2);
    assert_eq!(detail.projects[0].project_id, newer.id);
    assert_eq!(detail.projects[0].description, None);
    assert_eq!(detail.projects[0].github_url, None);

    let older_summary = &detail.projects[1];
    assert_eq!(older_summary.project_id, older.id);
    assert_eq!(
        older_summary.description.as_deref(),
        Some("A data pipeline for telemetry")
    );
    assert_eq!(
        older_summary.github_url.as_deref(),
        Some("https://github.com/alice/older")
    );
    assert_eq!(older_summary.stacks.len(), 1);
    assert_eq!(older_summary.stacks[0].stack_name, "Go");
}
