use async_trait::async_trait;
use chrono::{DateTime, Utc};
use migration::USER_NAME_MAX_LEN;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};

use crate::error::{ensure_max_len, ensure_not_blank};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "comment_likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub comment_id: i32,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    #[sea_orm(belongs_to, from = "comment_id", to = "id")]
    pub comment: HasOne<super::comment::Entity>,
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
        if insert {
            if let ActiveValue::Set(user_name) = &self.user_name {
                let user_name = user_name.trim().to_string();
                ensure_not_blank("user_name", &user_name)?;
                ensure_max_len("user_name", &user_name, USER_NAME_MAX_LEN)?;
                self.user_name = Set(user_name);
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, Set};

    use super::*;
    use crate::database::Database;
    use crate::entities::comment;
    use crate::error::ConstraintViolation;
    use crate::test_utils::test_db;

    async fn insert_comment(db: &Database, song_title: &str) -> comment::Model {
        comment::ActiveModel {
            song_title: Set(song_title.into()),
            user_name: Set("author".into()),
            comment_text: Set("nice".into()),
            ..comment::ActiveModel::new()
        }
        .insert(&db.conn)
        .await
        .unwrap()
    }

    fn like(comment_id: i32, user_name: &str) -> ActiveModel {
        ActiveModel {
            comment_id: Set(comment_id),
            user_name: Set(user_name.into()),
            ..ActiveModel::new()
        }
    }

    #[tokio::test]
    async fn test_like_comment() {
        let db = test_db().await;
        let comment = insert_comment(&db, "Song").await;

        let liked = like(comment.id, "alice").insert(&db.conn).await.unwrap();

        assert_eq!(liked.comment_id, comment.id);
        assert_eq!(liked.user_name, "alice");
        assert_eq!(
            comment
                .find_related(Entity)
                .count(&db.conn)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_like_is_unique_violation() {
        let db = test_db().await;
        let comment = insert_comment(&db, "Song").await;
        like(comment.id, "alice").insert(&db.conn).await.unwrap();

        let err = like(comment.id, "alice")
            .insert(&db.conn)
            .await
            .unwrap_err();

        assert!(matches!(
            ConstraintViolation::from_db_err(&err),
            Some(ConstraintViolation::Duplicate(_))
        ));
        assert_eq!(Entity::find().count(&db.conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_user_can_like_different_comments() {
        let db = test_db().await;
        let first = insert_comment(&db, "Song").await;
        let second = insert_comment(&db, "Song").await;

        like(first.id, "alice").insert(&db.conn).await.unwrap();
        like(second.id, "alice").insert(&db.conn).await.unwrap();
        like(first.id, "bob").insert(&db.conn).await.unwrap();

        assert_eq!(Entity::find().count(&db.conn).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_like_unknown_comment_is_foreign_key_violation() {
        let db = test_db().await;

        let err = like(9999, "alice").insert(&db.conn).await.unwrap_err();

        assert!(matches!(
            ConstraintViolation::from_db_err(&err),
            Some(ConstraintViolation::MissingParent(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_comment_cascades_to_likes() {
        let db = test_db().await;
        let doomed = insert_comment(&db, "Song").await;
        let kept = insert_comment(&db, "Song").await;
        like(doomed.id, "alice").insert(&db.conn).await.unwrap();
        like(doomed.id, "bob").insert(&db.conn).await.unwrap();
        like(kept.id, "alice").insert(&db.conn).await.unwrap();

        doomed.delete(&db.conn).await.unwrap();

        let remaining = Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].comment_id, kept.id);
    }

    #[tokio::test]
    async fn test_unlike_removes_only_that_like() {
        let db = test_db().await;
        let comment = insert_comment(&db, "Song").await;
        let alice = like(comment.id, "alice").insert(&db.conn).await.unwrap();
        like(comment.id, "bob").insert(&db.conn).await.unwrap();

        alice.delete(&db.conn).await.unwrap();

        let remaining = Entity::find().all(&db.conn).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_name, "bob");
        // alice may like it again
        like(comment.id, "alice").insert(&db.conn).await.unwrap();
    }

    #[tokio::test]
    async fn test_user_name_over_limit_is_rejected() {
        let db = test_db().await;
        let comment = insert_comment(&db, "Song").await;

        let err = like(comment.id, &"u".repeat(101))
            .insert(&db.conn)
            .await
            .unwrap_err();

        assert_eq!(
            ConstraintViolation::from_db_err(&err),
            Some(ConstraintViolation::TooLong {
                column: "user_name".into(),
                max: 100,
            })
        );
    }

    #[tokio::test]
    async fn test_blank_user_name_is_rejected() {
        let db = test_db().await;
        let comment = insert_comment(&db, "Song").await;

        let err = like(comment.id, "  ").insert(&db.conn).await.unwrap_err();

        assert_eq!(
            ConstraintViolation::from_db_err(&err),
            Some(ConstraintViolation::Blank {
                column: "user_name".into()
            })
        );
        assert_eq!(Entity::find().count(&db.conn).await.unwrap(), 0);
    }
}
