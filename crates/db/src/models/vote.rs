use chrono::{DateTime, Utc};
use diesel::{prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    models::{Comment, Post},
    schema::votes,
    types::{DbId, DbVoteType},
};

/// One ledger row: a single user's like or dislike of a single target.
/// Rows are inserted and deleted, never updated in place.
#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = votes)]
pub struct Vote {
    pub id: DbId,
    pub author_id: DbId,
    pub post_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub vote_type: DbVoteType,
    pub published: DateTime<Utc>,
}

/// What a vote applies to, resolved once per call.
#[derive(Debug, Clone)]
pub enum VoteTarget {
    Post(Post),
    Comment(Comment),
}

impl VoteTarget {
    pub fn author_id(&self) -> &DbId {
        match self {
            Self::Post(post) => &post.author,
            Self::Comment(comment) => &comment.author,
        }
    }
}

impl Vote {
    pub fn new(actor_id: DbId, target: &VoteTarget, vote_type: DbVoteType) -> Self {
        let (post_id, comment_id) = match target {
            VoteTarget::Post(post) => (Some(post.id.clone()), None),
            VoteTarget::Comment(comment) => (None, Some(comment.id.clone())),
        };

        Vote {
            id: DbId::default(),
            author_id: actor_id,
            post_id,
            comment_id,
            vote_type,
            published: Utc::now(),
        }
    }

    pub async fn by_actor_and_target(
        actor_id: &DbId,
        target: &VoteTarget,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let mut query = votes::table
            .filter(votes::author_id.eq(actor_id))
            .into_boxed();

        query = match target {
            VoteTarget::Post(post) => query.filter(votes::post_id.eq(&post.id)),
            VoteTarget::Comment(comment) => query.filter(votes::comment_id.eq(&comment.id)),
        };

        let vote = query.first::<Self>(&mut db_pool.get().await?).await;
        match vote {
            Ok(vote) => Ok(Some(vote)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
