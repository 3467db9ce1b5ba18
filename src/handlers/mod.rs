pub mod auth;
pub mod careers;
pub mod licenses;
pub mod links;
pub mod portfolios;
pub mod projects;
pub mod stacks;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes ──
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(auth::signup))
            .route("/check-id", web::post().to(auth::check_id))
            .route("/login", web::post().to(auth::login))
            .route("/refresh", web::post().to(auth::refresh))
            .route("/logout", web::post().to(auth::logout)),
    );

    // ── User routes (literal `/me` paths registered before `{user_id}`) ──
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(users::get_me))
            .route("/me", web::patch().to(users::update_me))
            .route(
                "/me/portfolios",
                web::get().to(portfolios::get_my_portfolios),
            )
            .route(
                "/{user_id}/portfolios",
                web::get().to(portfolios::get_user_portfolios),
            ),
    );

    // ── Profile building blocks (careers, licenses, stacks, links) ──
    cfg.service(
        web::scope("/careers")
            .route("", web::get().to(careers::get_careers))
            .route("", web::post().to(careers::replace_careers))
            .route("/{id}", web::get().to(careers::get_career))
            .route("/{id}", web::patch().to(careers::update_career))
            .route("/{id}", web::delete().to(careers::delete_career)),
    );
    cfg.service(
        web::scope("/licenses")
            .route("", web::get().to(licenses::get_licenses))
            .route("", web::post().to(licenses::replace_licenses))
            .route("/{id}", web::get().to(licenses::get_license))
            .route("/{id}", web::patch().to(licenses::update_license))
            .route("/{id}", web::delete().to(licenses::delete_license)),
    );
    cfg.service(
        web::scope("/stacks")
            .route("", web::get().to(stacks::get_stacks))
            .route("", web::post().to(stacks::replace_stacks))
            .route("/{id}", web::get().to(stacks::get_stack))
            .route("/{id}", web::patch().to(stacks::update_stack))
            .route("/{id}", web::delete().to(stacks::delete_stack)),
    );
    cfg.service(
        web::scope("/links")
            .route("", web::get().to(links::get_links))
            .route("", web::post().to(links::create_link))
            .route("/{id}", web::get().to(links::get_link))
            .route("/{id}", web::patch().to(links::update_link))
            .route("/{id}", web::delete().to(links::delete_link)),
    );

    // ── Project routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::patch().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project)),
    );

    // ── Portfolio routes (literal paths registered before `{id}`) ──
    cfg.service(
        web::scope("/portfolios")
            .route("", web::post().to(portfolios::create_portfolio))
            .route("/search", web::get().to(portfolios::search))
            .route("/recommend", web::get().to(portfolios::recommend))
            .route("/check", web::get().to(portfolios::check_requirements))
            .route("/{id}", web::get().to(portfolios::get_portfolio))
            .route("/{id}", web::patch().to(portfolios::update_portfolio))
            .route("/{id}", web::delete().to(portfolios::delete_portfolio))
            .route("/{id}/like", web::post().to(portfolios::like_portfolio))
            .route(
                "/{id}/unlike",
                web::delete().to(portfolios::unlike_portfolio),
            ),
    );
}
