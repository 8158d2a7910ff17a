use std::sync::Arc;

use chrono::Utc;
use db::{
    models::{Category, Post, PostCategory, User},
    schema::{post_categories, posts},
    types::{DbId, DbPostStatus},
};
use diesel::{delete, insert_into, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use web::AppState;

/// Inactive posts stay readable for their owner and for admins only.
pub fn accessible_for(post: &Post, user: Option<&User>) -> bool {
    match post.status {
        DbPostStatus::Active => true,
        DbPostStatus::Inactive => {
            user.map(|user| user.admin || user.id == post.author) == Some(true)
        }
    }
}

pub struct NewPost {
    pub title: String,
    pub content: String,
    pub categories: Vec<Category>,
}

pub async fn post(by: &User, options: NewPost, state: &Arc<AppState>) -> anyhow::Result<Post> {
    let mut conn = state.db_pool.get().await?;
    let id = DbId::default();

    let object = Post {
        id: id.clone(),
        author: by.id.clone(),
        title: html_escape::encode_text(&options.title).to_string(),
        content: html_escape::encode_text(&options.content).to_string(),
        rating: 0,
        status: DbPostStatus::Active,
        published: Utc::now(),
        updated: None,
    };

    let categories_data: Vec<PostCategory> = options
        .categories
        .iter()
        .map(|category| PostCategory {
            post_id: id.clone(),
            category_id: category.id.clone(),
        })
        .collect();

    insert_into(posts::dsl::posts)
        .values(vec![object.clone()])
        .execute(&mut conn)
        .await?;

    insert_into(post_categories::dsl::post_categories)
        .values(categories_data)
        .on_conflict((
            post_categories::dsl::post_id,
            post_categories::dsl::category_id,
        ))
        .do_nothing()
        .execute(&mut conn)
        .await?;

    Ok(object)
}

pub async fn set_categories(
    post: &Post,
    categories: Vec<Category>,
    state: &Arc<AppState>,
) -> anyhow::Result<()> {
    let mut conn = state.db_pool.get().await?;

    delete(post_categories::table.filter(post_categories::post_id.eq(&post.id)))
        .execute(&mut conn)
        .await?;

    let categories_data: Vec<PostCategory> = categories
        .iter()
        .map(|category| PostCategory {
            post_id: post.id.clone(),
            category_id: category.id.clone(),
        })
        .collect();

    insert_into(post_categories::dsl::post_categories)
        .values(categories_data)
        .execute(&mut conn)
        .await?;

    Ok(())
}

/// Resolves the ids against the categories table, in order; `None` means at
/// least one id is unknown.
pub async fn resolve_categories(
    ids: Vec<String>,
    state: &Arc<AppState>,
) -> anyhow::Result<Option<Vec<Category>>> {
    let mut categories = Vec::with_capacity(ids.len());
    for id in ids {
        match Category::by_id(&DbId::from(id), &state.db_pool).await? {
            Some(category) => categories.push(category),
            None => return Ok(None),
        }
    }

    Ok(Some(categories))
}
