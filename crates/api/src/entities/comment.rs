use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::models::Comment;
use futures::future::join_all;
use serde::Serialize;
use web::AppState;

use super::Account;

#[derive(Serialize, Debug)]
pub struct CommentView {
    pub id: String,
    pub post_id: String,
    pub author: Account,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CommentView {
    pub async fn build(comment: Comment, state: &Arc<AppState>) -> anyhow::Result<Self> {
        let author = comment.author(&state.db_pool).await?;

        Ok(Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author: Account::build(author, state, false).await?,
            content: comment.content,
            rating: comment.rating,
            created_at: comment.published,
            updated_at: comment.updated,
        })
    }

    pub async fn build_from_vec(
        comments: Vec<Comment>,
        state: &Arc<AppState>,
    ) -> anyhow::Result<Vec<Self>> {
        join_all(
            comments
                .into_iter()
                .map(|comment| async move { Self::build(comment, state).await }),
        )
        .await
        .into_iter()
        .collect()
    }
}
