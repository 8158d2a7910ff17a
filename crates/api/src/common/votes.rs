use std::sync::Arc;

use db::{
    models::{User, Vote, VoteTarget},
    schema::{comments, posts, users, votes},
    types::DbVoteType,
};
use diesel::{delete, insert_into, ExpressionMethods, QueryDsl};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use web::AppState;

/// Adjusts the target's rating and its author's rating by `delta` with
/// in-database increments. Must run inside the same transaction as the
/// ledger change: the counters and the ledger move together or not at all.
async fn adjust_ratings(
    target: &VoteTarget,
    delta: i32,
    conn: &mut AsyncPgConnection,
) -> Result<(), diesel::result::Error> {
    match target {
        VoteTarget::Post(post) => {
            diesel::update(posts::table.filter(posts::id.eq(&post.id)))
                .set(posts::rating.eq(posts::rating + delta))
                .execute(conn)
                .await?;
        }
        VoteTarget::Comment(comment) => {
            diesel::update(comments::table.filter(comments::id.eq(&comment.id)))
                .set(comments::rating.eq(comments::rating + delta))
                .execute(conn)
                .await?;
        }
    }

    diesel::update(users::table.filter(users::id.eq(target.author_id())))
        .set(users::rating.eq(users::rating + delta))
        .execute(conn)
        .await?;

    Ok(())
}

/// Records a vote and bumps both derived counters. The caller has already
/// checked that no vote by this actor on this target exists; a concurrent
/// duplicate still aborts on the unique index and rolls the counters back.
pub async fn vote(
    actor: &User,
    target: &VoteTarget,
    vote_type: DbVoteType,
    state: &Arc<AppState>,
) -> anyhow::Result<Vote> {
    let mut conn = state.db_pool.get().await?;

    let new_vote = Vote::new(actor.id.clone(), target, vote_type);
    let delta = new_vote.vote_type.delta();

    let vote = conn
        .transaction::<Vote, diesel::result::Error, _>(|conn| {
            async move {
                adjust_ratings(target, delta, conn).await?;

                insert_into(votes::table)
                    .values(&new_vote)
                    .get_result::<Vote>(conn)
                    .await
            }
            .scope_boxed()
        })
        .await?;

    Ok(vote)
}

/// Removes the actor's vote on the target, reversing exactly the adjustment
/// its creation applied. Returns the removed ledger row, or `None` if the
/// actor never voted.
pub async fn unvote(
    actor: &User,
    target: &VoteTarget,
    state: &Arc<AppState>,
) -> anyhow::Result<Option<Vote>> {
    let existing = match Vote::by_actor_and_target(&actor.id, target, &state.db_pool).await? {
        Some(existing) => existing,
        None => return Ok(None),
    };

    let mut conn = state.db_pool.get().await?;

    let delta = -existing.vote_type.delta();
    let existing_id = existing.id.clone();

    // The delete doubles as a guard against a concurrent removal of the
    // same row: only the call that actually deleted it reverses the
    // counters.
    let removed = conn
        .transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                let removed = delete(votes::table.filter(votes::id.eq(&existing_id)))
                    .execute(conn)
                    .await?;

                if removed == 1 {
                    adjust_ratings(target, delta, conn).await?;
                }

                Ok(removed)
            }
            .scope_boxed()
        })
        .await?;

    if removed == 1 {
        Ok(Some(existing))
    } else {
        Ok(None)
    }
}
