use anyhow::anyhow;
use chrono::{DateTime, Utc};
use diesel::{delete, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Category, User},
    paginate,
    pagination::Pagination,
    schema::{categories, post_categories, posts},
    types::{DbId, DbPostStatus},
};

#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: DbId,
    pub author: DbId,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub status: DbPostStatus,
    pub published: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = posts)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<DbPostStatus>,
    pub updated: Option<Option<DateTime<Utc>>>,
}

#[derive(Queryable, Insertable, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = post_categories)]
pub struct PostCategory {
    pub post_id: DbId,
    pub category_id: DbId,
}

impl Post {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let post = posts::table
            .filter(posts::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match post {
            Ok(post) => Ok(Some(post)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(
        &self,
        updated_post: PostUpdate,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(&self)
            .set(updated_post)
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<()> {
        delete(posts::table.filter(posts::id.eq(&self.id)))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn author(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<User> {
        User::by_id(&self.author, db_pool)
            .await?
            .ok_or(anyhow!("This wasn't supposed to happen"))
    }

    pub async fn categories(
        &self,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Category>> {
        Ok(post_categories::table
            .filter(post_categories::post_id.eq(&self.id))
            .inner_join(categories::dsl::categories.on(categories::id.eq(post_categories::category_id)))
            .select(categories::all_columns)
            .order(categories::name.asc())
            .load::<Category>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn list_active(
        pagination: Pagination,
        category_id: Option<&DbId>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let mut query = posts::table
            .filter(posts::status.eq(DbPostStatus::Active))
            .select(posts::all_columns)
            .order(posts::published.desc())
            .into_boxed();

        if let Some(category_id) = category_id {
            query = query.filter(
                posts::id.eq_any(
                    post_categories::table
                        .filter(post_categories::category_id.eq(category_id))
                        .select(post_categories::post_id),
                ),
            );
        }

        let query = paginate!(query, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }

    pub async fn count_active(
        category_id: Option<&DbId>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<i64> {
        let count = if let Some(category_id) = category_id {
            posts::table
                .filter(posts::status.eq(DbPostStatus::Active))
                .filter(
                    posts::id.eq_any(
                        post_categories::table
                            .filter(post_categories::category_id.eq(category_id))
                            .select(post_categories::post_id),
                    ),
                )
                .count()
                .get_result(&mut db_pool.get().await?)
                .await?
        } else {
            posts::table
                .filter(posts::status.eq(DbPostStatus::Active))
                .count()
                .get_result(&mut db_pool.get().await?)
                .await?
        };

        Ok(count)
    }
}

impl PostUpdate {
    pub fn new() -> Self {
        Self {
            title: None,
            content: None,
            status: None,
            updated: None,
        }
    }
}

impl Default for PostUpdate {
    fn default() -> Self {
        Self::new()
    }
}
