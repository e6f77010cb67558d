use async_trait::async_trait;
use chrono::{DateTime, Utc};
use migration::{COMMENT_TEXT_MAX_LEN, PROFILE_PIC_MAX_LEN, SONG_TITLE_MAX_LEN, USER_NAME_MAX_LEN};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, QueryFilter, QueryOrder, Set};

use crate::error::{ensure_max_len, ensure_not_blank};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub song_title: String,
    pub user_name: String,
    pub comment_text: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    #[sea_orm(has_many)]
    pub likes: HasMany<super::comment_like::Entity>,
}

/// Song titles are keyed trimmed and lowercased, so "Song A " and "song a"
/// land on the same comment thread.
///
/// The fold never changes the character count: a character whose lowercase
/// form spans several characters (e.g. `İ`) is kept as is, so a title that
/// fits `VARCHAR(500)` still fits once normalized.
pub fn normalize_song_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

impl Entity {
    /// All comments on a song, oldest first.
    pub fn find_by_song(song_title: &str) -> Select<Entity> {
        Self::find()
            .filter(Column::SongTitle.eq(normalize_song_title(song_title)))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            return Ok(self);
        }

        if let ActiveValue::Set(title) = &self.song_title {
            let title = normalize_song_title(title);
            ensure_not_blank("song_title", &title)?;
            ensure_max_len("song_title", &title, SONG_TITLE_MAX_LEN)?;
            self.song_title = Set(title);
        }
        if let ActiveValue::Set(user_name) = &self.user_name {
            let user_name = user_name.trim().to_string();
            ensure_not_blank("user_name", &user_name)?;
            ensure_max_len("user_name", &user_name, USER_NAME_MAX_LEN)?;
            self.user_name = Set(user_name);
        }
        if let ActiveValue::Set(text) = &self.comment_text {
            let text = text.trim().to_string();
            ensure_not_blank("comment_text", &text)?;
            ensure_max_len("comment_text", &text, COMMENT_TEXT_MAX_LEN)?;
            self.comment_text = Set(text);
        }
        if let ActiveValue::Set(Some(profile_pic)) = &self.profile_pic {
            ensure_max_len("profile_pic", profile_pic, PROFILE_PIC_MAX_LEN)?;
        }

        Ok(self)
    }
}
