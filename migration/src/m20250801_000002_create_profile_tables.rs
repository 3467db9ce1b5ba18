use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `careers` table and its columns.
#[derive(DeriveIden)]
enum Careers {
    Table,
    Id,
    UserId,
    Content,
    StartDate,
    EndDate,
    CreatedAt,
}

/// Identifiers for the `licenses` table and its columns.
#[derive(DeriveIden)]
enum Licenses {
    Table,
    Id,
    UserId,
    Name,
    GotDate,
    EndDate,
    CreatedAt,
}

/// Identifiers for the `stacks` table and its columns.
#[derive(DeriveIden)]
enum Stacks {
    Table,
    Id,
    UserId,
    Name,
    Level,
    CreatedAt,
}

/// Identifiers for the `user_links` table and its columns.
#[derive(DeriveIden)]
enum UserLinks {
    Table,
    Id,
    UserId,
    Name,
    Url,
    LinkSite,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Careers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Careers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Careers::UserId).integer().not_null())
                    .col(ColumnDef::new(Careers::Content).text().not_null())
                    .col(
                        ColumnDef::new(Careers::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Careers::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Careers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_careers_user_id")
                            .from(Careers::Table, Careers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Licenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Licenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Licenses::UserId).integer().not_null())
                    .col(ColumnDef::new(Licenses::Name).string().not_null())
                    .col(
                        ColumnDef::new(Licenses::GotDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Licenses::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Licenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_licenses_user_id")
                            .from(Licenses::Table, Licenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stacks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stacks::UserId).integer().not_null())
                    .col(ColumnDef::new(Stacks::Name).string().not_null())
                    .col(ColumnDef::new(Stacks::Level).string())
                    .col(
                        ColumnDef::new(Stacks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stacks_user_id")
                            .from(Stacks::Table, Stacks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserLinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserLinks::UserId).integer().not_null())
                    .col(ColumnDef::new(UserLinks::Name).string().not_null())
                    .col(ColumnDef::new(UserLinks::Url).string().not_null())
                    .col(ColumnDef::new(UserLinks::LinkSite).string())
                    .col(
                        ColumnDef::new(UserLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_links_user_id")
                            .from(UserLinks::Table, UserLinks::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Licenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Careers::Table).to_owned())
            .await
    }
}
