use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use crate::{USER_NAME_MAX_LEN, m20251016_000001_create_comments_table::Comments, with_table_options};

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
            .drop_table(Table::drop().table(CommentLikes::Table).to_owned())
            .await
    }
}

pub(crate) fn create_table(backend: DatabaseBackend) -> TableCreateStatement {
    let mut table = Table::create()
        .table(CommentLikes::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CommentLikes::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(CommentLikes::CommentId).integer().not_null())
        .col(
            ColumnDef::new(CommentLikes::UserName)
                .string_len(USER_NAME_MAX_LEN)
                .not_null(),
        )
        .col(
            ColumnDef::new(CommentLikes::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_comment_likes_comment_id")
                .from(CommentLikes::Table, CommentLikes::CommentId)
                .to(Comments::Table, Comments::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    with_table_options(backend, &mut table);
    table
}

pub(crate) fn create_indexes() -> Vec<IndexCreateStatement> {
    vec![
        // One like per user per comment
        Index::create()
            .unique()
            .name("uq_comment_likes_comment_user")
            .table(CommentLikes::Table)
            .col(CommentLikes::CommentId)
            .col(CommentLikes::UserName)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_comment_likes_comment_id")
            .table(CommentLikes::Table)
            .col(CommentLikes::CommentId)
            .if_not_exists()
            .to_owned(),
    ]
}

#[derive(DeriveIden)]
pub enum CommentLikes {
    Table,
    Id,
    CommentId,
    UserName,
    CreatedAt,
}
