pub mod careers;
pub mod licenses;
pub mod portfolio_careers;
pub mod portfolio_likes;
pub mod portfolio_projects;
pub mod portfolio_stacks;
pub mod portfolios;
pub mod project_contents;
pub mod project_images;
pub mod project_links;
pub mod project_stacks;
pub mod project_tags;
pub mod projects;
pub mod stacks;
pub mod user_links;
pub mod users;
