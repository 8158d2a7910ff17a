use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::models::User;
use futures::future::join_all;
use serde::Serialize;
use web::AppState;

#[derive(Clone, Serialize, Debug)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub rating: i32,
    pub admin: bool,
    pub posts_count: u32,
    pub created_at: DateTime<Utc>,

    /// Present only when the account is viewed by its owner or an admin.
    pub email: Option<String>,
}

impl Account {
    pub async fn build(
        user: User,
        state: &Arc<AppState>,
        with_email: bool,
    ) -> anyhow::Result<Self> {
        let posts_count = user.posts_count(&state.db_pool).await?;

        Ok(Self {
            id: user.id.to_string(),
            username: user.name.clone(),
            display_name: user.display_name.unwrap_or(user.name),
            bio: user.bio.unwrap_or_default(),
            rating: user.rating,
            admin: user.admin,
            posts_count: posts_count.try_into().unwrap_or(u32::MAX),
            created_at: user.published,
            email: match with_email {
                true => Some(user.email),
                false => None,
            },
        })
    }

    pub async fn build_from_vec(
        users: Vec<User>,
        state: &Arc<AppState>,
        with_email: bool,
    ) -> anyhow::Result<Vec<Self>> {
        join_all(
            users
                .into_iter()
                .map(|user| async move { Self::build(user, state, with_email).await }),
        )
        .await
        .into_iter()
        .collect()
    }
}
