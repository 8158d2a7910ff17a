use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{schema::categories, types::DbId};

#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub published: DateTime<Utc>,
}

#[derive(AsChangeset, Clone)]
#[diesel(table_name = categories)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Category {
    pub async fn create(
        name: String,
        description: Option<String>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Self> {
        let category = Category {
            id: DbId::default(),
            name,
            description,
            published: Utc::now(),
        };

        Ok(insert_into(categories::table)
            .values(category)
            .get_result::<Category>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let category = categories::table
            .filter(categories::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match category {
            Ok(category) => Ok(Some(category)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn by_name(
        name: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let category = categories::table
            .filter(categories::name.eq(name.to_string()))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match category {
            Ok(category) => Ok(Some(category)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn all(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<Vec<Self>> {
        Ok(categories::table
            .select(categories::all_columns)
            .order(categories::name.asc())
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn update(
        &self,
        updated_category: CategoryUpdate,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(&self)
            .set(updated_category)
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<()> {
        delete(categories::table.filter(categories::id.eq(&self.id)))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }
}
