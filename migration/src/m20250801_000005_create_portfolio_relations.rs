use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Snapshot join rows: `name`/`level` are copied from the source stack at
/// attach time and never re-read from `stacks`.
#[derive(DeriveIden)]
enum PortfolioStacks {
    Table,
    Id,
    PortfolioId,
    StackId,
    UserId,
    Name,
    Level,
    Rank,
}

/// Snapshot join rows: `content`/`start_date`/`end_date` are copied from the
/// source career at attach time; `description` is portfolio-specific.
#[derive(DeriveIden)]
enum PortfolioCareers {
    Table,
    Id,
    PortfolioId,
    CareerId,
    UserId,
    Content,
    StartDate,
    EndDate,
    Description,
}

/// Plain many-to-many association; project data is read live.
#[derive(DeriveIden)]
enum PortfolioProjects {
    Table,
    Id,
    PortfolioId,
    ProjectId,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Stacks {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Careers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Restrict (not cascade) on the source foreign keys: deleting a stack,
        // career, project, or portfolio must detach these rows first, in the
        // same transaction.
        manager
            .create_table(
                Table::create()
                    .table(PortfolioStacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioStacks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioStacks::PortfolioId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioStacks::StackId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioStacks::UserId).integer().not_null())
                    .col(ColumnDef::new(PortfolioStacks::Name).string().not_null())
                    .col(ColumnDef::new(PortfolioStacks::Level).string())
                    .col(ColumnDef::new(PortfolioStacks::Rank).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_stacks_portfolio_id")
                            .from(PortfolioStacks::Table, PortfolioStacks::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_stacks_stack_id")
                            .from(PortfolioStacks::Table, PortfolioStacks::StackId)
                            .to(Stacks::Table, Stacks::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioCareers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioCareers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioCareers::PortfolioId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioCareers::CareerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioCareers::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioCareers::Content).text().not_null())
                    .col(
                        ColumnDef::new(PortfolioCareers::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioCareers::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(PortfolioCareers::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_careers_portfolio_id")
                            .from(PortfolioCareers::Table, PortfolioCareers::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_careers_career_id")
                            .from(PortfolioCareers::Table, PortfolioCareers::CareerId)
                            .to(Careers::Table, Careers::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioProjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjects::PortfolioId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjects::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_projects_portfolio_id")
                            .from(PortfolioProjects::Table, PortfolioProjects::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_projects_project_id")
                            .from(PortfolioProjects::Table, PortfolioProjects::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One association per (portfolio, project) pair.
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_projects_unique")
                    .table(PortfolioProjects::Table)
                    .col(PortfolioProjects::PortfolioId)
                    .col(PortfolioProjects::ProjectId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioProjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioCareers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioStacks::Table).to_owned())
            .await
    }
}
