use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Careers {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Stacks {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    UserId,
    Visibility,
    Views,
}

#[derive(DeriveIden)]
enum PortfolioStacks {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum PortfolioCareers {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum PortfolioProjects {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum PortfolioLikes {
    Table,
    PortfolioId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on careers.user_id for the requirement check and bulk replace
        manager
            .create_index(
                Index::create()
                    .name("idx_careers_user_id")
                    .table(Careers::Table)
                    .col(Careers::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on stacks.user_id for owner-scoped listings
        manager
            .create_index(
                Index::create()
                    .name("idx_stacks_user_id")
                    .table(Stacks::Table)
                    .col(Stacks::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on projects.user_id for owner-scoped listings
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_user_id")
                    .table(Projects::Table)
                    .col(Projects::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on portfolios.user_id for per-user portfolio listings
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_user_id")
                    .table(Portfolios::Table)
                    .col(Portfolios::UserId)
                    .to_owned(),
            )
            .await?;

        // Index on portfolios (visibility, views) for the recommend query
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolios_visibility_views")
                    .table(Portfolios::Table)
                    .col(Portfolios::Visibility)
                    .col(Portfolios::Views)
                    .to_owned(),
            )
            .await?;

        // Indexes on the portfolio relation tables for detail reads and
        // full-replace deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_stacks_portfolio_id")
                    .table(PortfolioStacks::Table)
                    .col(PortfolioStacks::PortfolioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_careers_portfolio_id")
                    .table(PortfolioCareers::Table)
                    .col(PortfolioCareers::PortfolioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_projects_portfolio_id")
                    .table(PortfolioProjects::Table)
                    .col(PortfolioProjects::PortfolioId)
                    .to_owned(),
            )
            .await?;

        // Index on portfolio_likes.portfolio_id for like-count verification
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_likes_portfolio_id")
                    .table(PortfolioLikes::Table)
                    .col(PortfolioLikes::PortfolioId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_careers_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_stacks_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolios_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolios_visibility_views").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_stacks_portfolio_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_careers_portfolio_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_projects_portfolio_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_likes_portfolio_id").to_owned())
            .await?;

        Ok(())
    }
}
