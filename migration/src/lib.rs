pub use sea_orm_migration::prelude::*;

use sea_orm_migration::sea_orm::DatabaseBackend;

mod m20251016_000001_create_comments_table;
mod m20251016_000002_create_comment_likes_table;

pub use m20251016_000001_create_comments_table::Comments;
pub use m20251016_000002_create_comment_likes_table::CommentLikes;

/// Maximum length, in characters, of `comments.song_title`.
pub const SONG_TITLE_MAX_LEN: u32 = 500;
/// Maximum length, in characters, of `user_name` on both tables.
pub const USER_NAME_MAX_LEN: u32 = 100;
/// Maximum length, in characters, of `comments.comment_text`.
pub const COMMENT_TEXT_MAX_LEN: u32 = 200;
/// Maximum length, in characters, of `comments.profile_pic`.
pub const PROFILE_PIC_MAX_LEN: u32 = 500;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251016_000001_create_comments_table::Migration),
            Box::new(m20251016_000002_create_comment_likes_table::Migration),
        ]
    }
}

/// Renders every statement the migrations issue on `backend`, in order.
///
/// Each statement is terminated with `;` so the output can be fed to the
/// database's own client.
pub fn render_schema(backend: DatabaseBackend) -> Vec<String> {
    let mut statements = vec![
        backend
            .build(&m20251016_000001_create_comments_table::create_table(
                backend,
            ))
            .to_string(),
    ];
    statements.extend(
        m20251016_000001_create_comments_table::create_indexes()
            .iter()
            .map(|index| backend.build(index).to_string()),
    );
    statements.push(
        backend
            .build(&m20251016_000002_create_comment_likes_table::create_table(
                backend,
            ))
            .to_string(),
    );
    statements.extend(
        m20251016_000002_create_comment_likes_table::create_indexes()
            .iter()
            .map(|index| backend.build(index).to_string()),
    );

    statements
        .into_iter()
        .map(|statement| format!("{};", statement))
        .collect()
}

/// Applies the MySQL table options both tables share. Other backends have no
/// equivalent and are left untouched.
fn with_table_options(backend: DatabaseBackend, table: &mut TableCreateStatement) {
    if backend == DatabaseBackend::MySql {
        table
            .engine("InnoDB")
            .character_set("utf8mb4")
            .collate("utf8mb4_unicode_ci");
    }
}
