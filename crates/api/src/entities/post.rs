use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::{
    models::{Comment, Post},
    types::DbPostStatus,
};
use futures::future::join_all;
use serde::Serialize;
use web::AppState;

use super::{Account, CategoryView};

#[derive(Serialize, Debug)]
pub struct PostView {
    pub id: String,
    pub author: Account,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub status: DbPostStatus,
    pub categories: Vec<CategoryView>,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostView {
    pub async fn build(post: Post, state: &Arc<AppState>) -> anyhow::Result<Self> {
        let author = post.author(&state.db_pool).await?;
        let categories = post.categories(&state.db_pool).await?;
        let comments_count = Comment::count_by_post(&post.id, &state.db_pool).await?;

        Ok(Self {
            id: post.id.to_string(),
            author: Account::build(author, state, false).await?,
            title: post.title,
            content: post.content,
            rating: post.rating,
            status: post.status,
            categories: categories.into_iter().map(CategoryView::new).collect(),
            comments_count: comments_count.try_into().unwrap_or(u32::MAX),
            created_at: post.published,
            updated_at: post.updated,
        })
    }

    pub async fn build_from_vec(
        posts: Vec<Post>,
        state: &Arc<AppState>,
    ) -> anyhow::Result<Vec<Self>> {
        join_all(
            posts
                .into_iter()
                .map(|post| async move { Self::build(post, state).await }),
        )
        .await
        .into_iter()
        .collect()
    }
}
