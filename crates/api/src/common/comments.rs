use std::sync::Arc;

use chrono::Utc;
use db::{
    models::{Comment, Post, User},
    schema::comments,
    types::DbId,
};
use diesel::insert_into;
use diesel_async::RunQueryDsl;
use web::AppState;

pub async fn comment(
    by: &User,
    post: &Post,
    content: String,
    state: &Arc<AppState>,
) -> anyhow::Result<Comment> {
    let mut conn = state.db_pool.get().await?;

    let object = Comment {
        id: DbId::default(),
        post_id: post.id.clone(),
        author: by.id.clone(),
        content: html_escape::encode_text(&content).to_string(),
        rating: 0,
        published: Utc::now(),
        updated: None,
    };

    insert_into(comments::dsl::comments)
        .values(vec![object.clone()])
        .execute(&mut conn)
        .await?;

    Ok(object)
}
