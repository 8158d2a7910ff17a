use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use db::{
    models::{post::PostUpdate, user::UserUpdate, Post, User},
    pagination::PaginationQuery,
    types::{DbId, DbPostStatus},
};
use serde::Deserialize;
use web::{errors::AppError, AppState};

use crate::{
    auth_middleware::admin_middleware,
    entities::{Account, Page, PostView},
    error::ApiError,
};

pub async fn http_get_users(
    state: State<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = pagination.into();
    let total = User::count(&state.db_pool).await?;
    let users = User::list(pagination, &state.db_pool).await?;
    let items = Account::build_from_vec(users, &state, true).await?;

    Ok(Json(Page::new(items, total, pagination)).into_response())
}

#[derive(Deserialize)]
pub struct UpdateUserBody {
    admin: bool,
}

pub async fn http_patch_user(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = match User::by_id(&id, &state.db_pool).await? {
        Some(user) => user,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    user.update(
        UserUpdate {
            admin: Some(body.admin),
            updated: Some(Some(Utc::now())),
            ..UserUpdate::new()
        },
        &state.db_pool,
    )
    .await?;

    match User::by_id(&id, &state.db_pool).await? {
        Some(user) => Ok(Json(Account::build(user, &state, true).await?).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

#[derive(Deserialize)]
pub struct UpdatePostStatusBody {
    status: String,
}

pub async fn http_patch_post_status(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePostStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let status = match DbPostStatus::from_string(&body.status) {
        Some(status) => status,
        None => {
            return Ok(ApiError::new_with_description(
                "Validation failed",
                "Status must be either \"active\" or \"inactive\"",
                StatusCode::BAD_REQUEST,
            )
            .into_response())
        }
    };

    let post = match Post::by_id(&id, &state.db_pool).await? {
        Some(post) => post,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    post.update(
        PostUpdate {
            status: Some(status),
            ..PostUpdate::new()
        },
        &state.db_pool,
    )
    .await?;

    match Post::by_id(&id, &state.db_pool).await? {
        Some(post) => Ok(Json(PostView::build(post, &state).await?).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

pub fn admin(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/users",
            get(http_get_users.layer(from_fn_with_state(Arc::clone(state), admin_middleware))),
        )
        .route(
            "/admin/users/:id",
            patch(http_patch_user.layer(from_fn_with_state(Arc::clone(state), admin_middleware))),
        )
        .route(
            "/admin/posts/:id/status",
            patch(
                http_patch_post_status
                    .layer(from_fn_with_state(Arc::clone(state), admin_middleware)),
            ),
        )
}
