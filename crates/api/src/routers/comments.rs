use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use chrono::Utc;
use db::{
    models::{comment::CommentUpdate, Comment, Post, Session, Vote, VoteTarget},
    pagination::PaginationQuery,
    types::{DbId, DbVoteType},
};
use serde::{Deserialize, Serialize};
use web::{errors::AppError, AppState};

use crate::{
    auth_middleware::auth_middleware,
    common::{comments, posts, votes},
    entities::{CommentView, Page, VoteRecord},
    error::ApiError,
};

#[derive(Deserialize)]
pub struct NewCommentBody {
    content: String,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    Json(body): Json<NewCommentBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    if body.content.trim().is_empty() {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Content must not be empty",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    let user = session.user(&state.db_pool).await?;
    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, Some(&user)) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    let comment = comments::comment(&user, &post, body.content, &state).await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentView::build(comment, &state).await?),
    )
        .into_response())
}

pub async fn http_get_list(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, None) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    let pagination = pagination.into();
    let total = Comment::count_by_post(&post.id, &state.db_pool).await?;
    let comments_page = Comment::by_post(&post.id, pagination, &state.db_pool).await?;
    let items = CommentView::build_from_vec(comments_page, &state).await?;

    Ok(Json(Page::new(items, total, pagination)).into_response())
}

#[derive(Deserialize)]
pub struct UpdateCommentBody {
    content: String,
}

pub async fn http_patch(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    Json(body): Json<UpdateCommentBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    if body.content.trim().is_empty() {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Content must not be empty",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    let user = session.user(&state.db_pool).await?;
    let comment = match Comment::by_id(&id, &state.db_pool).await? {
        Some(comment) => comment,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    if comment.author != user.id {
        return Ok(
            ApiError::new("You can only edit your own comments", StatusCode::FORBIDDEN)
                .into_response(),
        );
    }

    comment
        .update(
            CommentUpdate {
                content: Some(html_escape::encode_text(&body.content).to_string()),
                updated: Some(Some(Utc::now())),
            },
            &state.db_pool,
        )
        .await?;

    match Comment::by_id(&id, &state.db_pool).await? {
        Some(comment) => Ok(Json(CommentView::build(comment, &state).await?).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

#[derive(Serialize)]
struct EmptyJsonObject {}

pub async fn http_delete(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = session.user(&state.db_pool).await?;
    let comment = match Comment::by_id(&id, &state.db_pool).await? {
        Some(comment) => comment,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    if comment.author != user.id && !user.admin {
        return Ok(ApiError::new(
            "You can only delete your own comments",
            StatusCode::FORBIDDEN,
        )
        .into_response());
    }

    comment.delete(&state.db_pool).await?;
    Ok(Json(EmptyJsonObject {}).into_response())
}

#[derive(Deserialize)]
pub struct VoteBody {
    #[serde(rename = "type")]
    vote_type: DbVoteType,
}

pub async fn http_post_like(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    Json(body): Json<VoteBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = session.user(&state.db_pool).await?;
    let comment = match Comment::by_id(&id, &state.db_pool).await? {
        Some(comment) => comment,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    let target = VoteTarget::Comment(comment);
    if Vote::by_actor_and_target(&user.id, &target, &state.db_pool)
        .await?
        .is_some()
    {
        return Ok(ApiError::new_with_description(
            "Already voted",
            "Remove the existing vote before voting again",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    let vote = votes::vote(&user, &target, body.vote_type, &state).await?;
    Ok((StatusCode::CREATED, Json(VoteRecord::new(vote))).into_response())
}

pub async fn http_delete_like(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = session.user(&state.db_pool).await?;
    let comment = match Comment::by_id(&id, &state.db_pool).await? {
        Some(comment) => comment,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    let target = VoteTarget::Comment(comment);
    match votes::unvote(&user, &target, &state).await? {
        Some(vote) => Ok(Json(VoteRecord::new(vote)).into_response()),
        None => Ok(ApiError::new("Vote not found", StatusCode::NOT_FOUND).into_response()),
    }
}

pub fn comments(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/posts/:id/comments",
            get(http_get_list).post(
                http_post_create.layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
            ),
        )
        .route(
            "/comments/:id",
            patch(http_patch.layer(from_fn_with_state(Arc::clone(state), auth_middleware)))
                .delete(http_delete.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/comments/:id/like",
            post(http_post_like.layer(from_fn_with_state(Arc::clone(state), auth_middleware)))
                .delete(
                    http_delete_like
                        .layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
                ),
        )
}
