use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `portfolio_likes` table and its columns.
#[derive(DeriveIden)]
enum PortfolioLikes {
    Table,
    Id,
    UserId,
    PortfolioId,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioLikes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortfolioLikes::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(PortfolioLikes::PortfolioId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioLikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_likes_user_id")
                            .from(PortfolioLikes::Table, PortfolioLikes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_likes_portfolio_id")
                            .from(PortfolioLikes::Table, PortfolioLikes::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Each user can like a given portfolio at most once.
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_likes_user_portfolio_unique")
                    .table(PortfolioLikes::Table)
                    .col(PortfolioLikes::UserId)
                    .col(PortfolioLikes::PortfolioId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioLikes::Table).to_owned())
            .await
    }
}
