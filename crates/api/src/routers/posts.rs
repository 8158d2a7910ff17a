use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use db::{
    models::{post::PostUpdate, Category, Post, Session, Vote, VoteTarget},
    pagination::{Pagination, PaginationQuery},
    types::{DbId, DbVoteType},
};
use serde::{Deserialize, Serialize};
use web::{errors::AppError, AppState};

use crate::{
    auth_middleware::{auth_middleware, optional_auth_middleware},
    common::{posts, votes},
    entities::{Page, PostView, VoteRecord},
    error::ApiError,
};

#[derive(Deserialize)]
pub struct NewPostBody {
    title: String,
    content: String,
    category_ids: Option<Vec<String>>,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<NewPostBody>,
) -> Result<impl IntoResponse, AppError> {
    let title = body.title.trim().to_string();
    if title.is_empty() || title.len() > 200 {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Title must be 1-200 characters",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    if body.content.trim().is_empty() {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Content must not be empty",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    let categories = match posts::resolve_categories(body.category_ids.unwrap_or_default(), &state)
        .await?
    {
        Some(categories) => categories,
        None => {
            return Ok(ApiError::new("Category not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    let user = session.user(&state.db_pool).await?;
    let post = posts::post(
        &user,
        posts::NewPost {
            title,
            content: body.content,
            categories,
        },
        &state,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostView::build(post, &state).await?),
    )
        .into_response())
}

pub async fn http_get_get(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Option<Session>>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = match &session {
        Some(session) => Some(session.user(&state.db_pool).await?),
        None => None,
    };

    match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, user.as_ref()) => {
            Ok(Json(PostView::build(post, &state).await?).into_response())
        }
        _ => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

#[derive(Deserialize)]
pub struct PostListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    category: Option<String>,
}

pub async fn http_get_list(
    state: State<Arc<AppState>>,
    Query(query): Query<PostListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let category = match query.category {
        Some(id) => match Category::by_id(&DbId::from(id), &state.db_pool).await? {
            Some(category) => Some(category),
            None => {
                return Ok(
                    ApiError::new("Category not found", StatusCode::NOT_FOUND).into_response()
                )
            }
        },
        None => None,
    };

    let pagination: Pagination = PaginationQuery {
        page: query.page,
        limit: query.limit,
    }
    .into();

    let category_id = category.as_ref().map(|category| &category.id);
    let total = Post::count_active(category_id, &state.db_pool).await?;
    let posts_page = Post::list_active(pagination, category_id, &state.db_pool).await?;
    let items = PostView::build_from_vec(posts_page, &state).await?;

    Ok(Json(Page::new(items, total, pagination)).into_response())
}

#[derive(Deserialize)]
pub struct UpdatePostBody {
    title: Option<String>,
    content: Option<String>,
    category_ids: Option<Vec<String>>,
}

pub async fn http_patch(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    Json(body): Json<UpdatePostBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = session.user(&state.db_pool).await?;
    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, Some(&user)) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    if post.author != user.id {
        return Ok(
            ApiError::new("You can only edit your own posts", StatusCode::FORBIDDEN)
                .into_response(),
        );
    }

    if let Some(title) = &body.title {
        let title = title.trim();
        if title.is_empty() || title.len() > 200 {
            return Ok(ApiError::new_with_description(
                "Validation failed",
                "Title must be 1-200 characters",
                StatusCode::BAD_REQUEST,
            )
            .into_response());
        }
    }

    if let Some(category_ids) = body.category_ids {
        let categories = match posts::resolve_categories(category_ids, &state).await? {
            Some(categories) => categories,
            None => {
                return Ok(
                    ApiError::new("Category not found", StatusCode::NOT_FOUND).into_response()
                )
            }
        };
        posts::set_categories(&post, categories, &state).await?;
    }

    post.update(
        PostUpdate {
            title: body
                .title
                .map(|title| html_escape::encode_text(title.trim()).to_string()),
            content: body
                .content
                .map(|content| html_escape::encode_text(&content).to_string()),
            status: None,
            updated: Some(Some(Utc::now())),
        },
        &state.db_pool,
    )
    .await?;

    match Post::by_id(&id, &state.db_pool).await? {
        Some(post) => Ok(Json(PostView::build(post, &state).await?).into_response()),
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
    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, Some(&user)) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    if post.author != user.id && !user.admin {
        return Ok(
            ApiError::new("You can only delete your own posts", StatusCode::FORBIDDEN)
                .into_response(),
        );
    }

    post.delete(&state.db_pool).await?;
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
    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, Some(&user)) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    let target = VoteTarget::Post(post);
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
    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) if posts::accessible_for(&post, Some(&user)) => post,
        _ => return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    };

    let target = VoteTarget::Post(post);
    match votes::unvote(&user, &target, &state).await? {
        Some(vote) => Ok(Json(VoteRecord::new(vote)).into_response()),
        None => Ok(ApiError::new("Vote not found", StatusCode::NOT_FOUND).into_response()),
    }
}

pub fn posts(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/posts",
            get(http_get_list).post(
                http_post_create.layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
            ),
        )
        .route(
            "/posts/:id",
            get(http_get_get
                .layer(from_fn_with_state(
                    Arc::clone(state),
                    optional_auth_middleware,
                )))
            .patch(http_patch.layer(from_fn_with_state(Arc::clone(state), auth_middleware)))
            .delete(http_delete.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/posts/:id/like",
            post(http_post_like.layer(from_fn_with_state(Arc::clone(state), auth_middleware)))
                .delete(
                    http_delete_like
                        .layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
                ),
        )
}
