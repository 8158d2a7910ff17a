use anyhow::anyhow;
use chrono::{DateTime, Utc};
use diesel::{delete, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::User,
    paginate,
    pagination::Pagination,
    schema::comments,
    types::DbId,
};

#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author: DbId,
    pub content: String,
    pub rating: i32,
    pub published: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = comments)]
pub struct CommentUpdate {
    pub content: Option<String>,
    pub updated: Option<Option<DateTime<Utc>>>,
}

impl Comment {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let comment = comments::table
            .filter(comments::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match comment {
            Ok(comment) => Ok(Some(comment)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(
        &self,
        updated_comment: CommentUpdate,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(&self)
            .set(updated_comment)
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<()> {
        delete(comments::table.filter(comments::id.eq(&self.id)))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn author(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<User> {
        User::by_id(&self.author, db_pool)
            .await?
            .ok_or(anyhow!("This wasn't supposed to happen"))
    }

    pub async fn by_post(
        post_id: &DbId,
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let query = comments::table
            .filter(comments::post_id.eq(post_id))
            .select(comments::all_columns)
            .order(comments::published.asc());
        let query = paginate!(query, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }

    pub async fn count_by_post(
        post_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<i64> {
        Ok(comments::table
            .filter(comments::post_id.eq(post_id))
            .count()
            .get_result(&mut db_pool.get().await?)
            .await?)
    }
}
