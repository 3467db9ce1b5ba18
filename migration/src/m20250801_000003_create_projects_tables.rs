use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `projects` table and its columns.
#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    UserId,
    Title,
    StartDate,
    EndDate,
    Role,
    Thumbnail,
    CreatedAt,
    UpdatedAt,
}

/// Child collections created together with a project. Each row keeps a
/// denormalized `user_id` so owner-scoped cleanups don't need a join.
#[derive(DeriveIden)]
enum ProjectTags {
    Table,
    Id,
    ProjectId,
    UserId,
    Content,
}

#[derive(DeriveIden)]
enum ProjectStacks {
    Table,
    Id,
    ProjectId,
    UserId,
    StackId,
    StackName,
}

#[derive(DeriveIden)]
enum ProjectContents {
    Table,
    Id,
    ProjectId,
    UserId,
    Title,
    Content,
}

#[derive(DeriveIden)]
enum ProjectImages {
    Table,
    Id,
    ProjectId,
    UserId,
    ImageUrl,
}

#[derive(DeriveIden)]
enum ProjectLinks {
    Table,
    Id,
    ProjectId,
    UserId,
    Name,
    Url,
    LinkSite,
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
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::UserId).integer().not_null())
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(
                        ColumnDef::new(Projects::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Projects::Role).string())
                    .col(ColumnDef::new(Projects::Thumbnail).string())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_user_id")
                            .from(Projects::Table, Projects::UserId)
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
                    .table(ProjectTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectTags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectTags::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectTags::UserId).integer().not_null())
                    .col(ColumnDef::new(ProjectTags::Content).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_tags_project_id")
                            .from(ProjectTags::Table, ProjectTags::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectStacks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectStacks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectStacks::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectStacks::UserId).integer().not_null())
                    .col(ColumnDef::new(ProjectStacks::StackId).integer().not_null())
                    .col(
                        ColumnDef::new(ProjectStacks::StackName)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_stacks_project_id")
                            .from(ProjectStacks::Table, ProjectStacks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectContents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectContents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectContents::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectContents::UserId).integer().not_null())
                    .col(ColumnDef::new(ProjectContents::Title).string().not_null())
                    .col(ColumnDef::new(ProjectContents::Content).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_contents_project_id")
                            .from(ProjectContents::Table, ProjectContents::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectImages::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectImages::UserId).integer().not_null())
                    .col(ColumnDef::new(ProjectImages::ImageUrl).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_images_project_id")
                            .from(ProjectImages::Table, ProjectImages::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectLinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectLinks::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectLinks::UserId).integer().not_null())
                    .col(ColumnDef::new(ProjectLinks::Name).string().not_null())
                    .col(ColumnDef::new(ProjectLinks::Url).string().not_null())
                    .col(ColumnDef::new(ProjectLinks::LinkSite).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_links_project_id")
                            .from(ProjectLinks::Table, ProjectLinks::ProjectId)
                            .to(Projects::Table, Projects::Id)
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
            .drop_table(Table::drop().table(ProjectLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectContents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectStacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}
