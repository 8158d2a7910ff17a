use chrono::{DateTime, Utc};
use diesel::{prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::Post,
    paginate,
    pagination::Pagination,
    schema::{posts, users},
    types::{DbId, DbPostStatus},
};

#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = users)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub password_encrypted: String,
    pub admin: bool,
    pub rating: i32,
    pub published: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = users)]
// When you want to null out a column, you have to send Some(None), since sending None means you just don't want to update that column
pub struct UserUpdate {
    pub display_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub password_encrypted: Option<String>,
    pub admin: Option<bool>,
    pub updated: Option<Option<DateTime<Utc>>>,
}

impl User {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn by_name(
        name: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::name.eq(name.to_string()))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn by_email(
        email: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::email.eq(email.to_string()))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(
        &self,
        updated_user: UserUpdate,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(&self)
            .set(updated_user)
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn list(
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let query = users::table
            .select(users::all_columns)
            .order(users::published.desc());
        let query = paginate!(query, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }

    pub async fn count(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<i64> {
        Ok(users::table
            .count()
            .get_result(&mut db_pool.get().await?)
            .await?)
    }

    /// Inactive posts are reachable for their owner through `Post::by_id`,
    /// never through profile listings.
    pub async fn posts(
        &self,
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Post>> {
        let query = posts::table
            .filter(posts::author.eq(&self.id))
            .filter(posts::status.eq(DbPostStatus::Active))
            .select(posts::all_columns)
            .order(posts::published.desc());
        let query = paginate!(query, pagination);

        Ok(query.load::<Post>(&mut db_pool.get().await?).await?)
    }

    pub async fn posts_count(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<i64> {
        Ok(posts::table
            .filter(posts::author.eq(&self.id))
            .filter(posts::status.eq(DbPostStatus::Active))
            .count()
            .get_result(&mut db_pool.get().await?)
            .await?)
    }
}

impl UserUpdate {
    pub fn new() -> Self {
        Self {
            display_name: None,
            bio: None,
            password_encrypted: None,
            admin: None,
            updated: None,
        }
    }
}

impl Default for UserUpdate {
    fn default() -> Self {
        Self::new()
    }
}
