use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::{
    COMMENT_TEXT_MAX_LEN, PROFILE_PIC_MAX_LEN, SONG_TITLE_MAX_LEN, USER_NAME_MAX_LEN,
    with_table_options,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager.create_table(create_table(backend)).await?;

        for index in create_indexes() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

pub(crate) fn create_table(backend: DatabaseBackend) -> TableCreateStatement {
    let mut table = Table::create()
        .table(Comments::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Comments::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Comments::SongTitle)
                .string_len(SONG_TITLE_MAX_LEN)
                .not_null(),
        )
        .col(
            ColumnDef::new(Comments::UserName)
                .string_len(USER_NAME_MAX_LEN)
                .not_null(),
        )
        .col(
            ColumnDef::new(Comments::CommentText)
                .string_len(COMMENT_TEXT_MAX_LEN)
                .not_null(),
        )
        .col(ColumnDef::new(Comments::ProfilePic).string_len(PROFILE_PIC_MAX_LEN))
        .col(
            ColumnDef::new(Comments::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned();

    with_table_options(backend, &mut table);
    table
}

pub(crate) fn create_indexes() -> Vec<IndexCreateStatement> {
    vec![
        // Full-width key: 500 utf8mb4 characters is 2000 bytes, under
        // InnoDB's 3072-byte limit, so no prefix length is needed.
        Index::create()
            .name("idx_comments_song_title")
            .table(Comments::Table)
            .col(Comments::SongTitle)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_comments_created_at")
            .table(Comments::Table)
            .col(Comments::CreatedAt)
            .if_not_exists()
            .to_owned(),
    ]
}

#[derive(DeriveIden)]
pub enum Comments {
    Table,
    Id,
    SongTitle,
    UserName,
    CommentText,
    ProfilePic,
    CreatedAt,
}
