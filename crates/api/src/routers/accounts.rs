use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use db::{
    models::{user::UserUpdate, Session, User},
    pagination::PaginationQuery,
    types::DbId,
};
use web::{errors::AppError, AppState};

use crate::{
    auth_middleware::auth_middleware,
    common::users,
    entities::{Account, Page, PostView},
    error::ApiError,
};

pub async fn http_get_me(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    let user = session.user(&state.db_pool).await?;
    Ok(Json(Account::build(user, &state, true).await?).into_response())
}

#[derive(serde::Deserialize)]
pub struct UpdateAccountBody {
    #[serde(default, with = "::serde_with::rust::double_option")]
    display_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    bio: Option<Option<String>>,
    password: Option<String>,
}

pub async fn http_patch_me(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<UpdateAccountBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = session.user(&state.db_pool).await?;

    let password_encrypted = match body.password {
        Some(password) => {
            if !users::valid_password(&password) {
                return Ok(ApiError::new_with_description(
                    "Validation failed",
                    "Password must be at least 8 characters",
                    StatusCode::BAD_REQUEST,
                )
                .into_response());
            }
            Some(users::hash_password(password).await?)
        }
        None => None,
    };

    user.update(
        UserUpdate {
            display_name: body.display_name,
            bio: body.bio,
            password_encrypted,
            admin: None,
            updated: Some(Some(Utc::now())),
        },
        &state.db_pool,
    )
    .await?;

    let user = session.user(&state.db_pool).await?;
    Ok(Json(Account::build(user, &state, true).await?).into_response())
}

pub async fn http_get_account(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    match User::by_id(&id, &state.db_pool).await? {
        Some(user) => Ok(Json(Account::build(user, &state, false).await?).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

pub async fn http_get_account_posts(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let user = match User::by_id(&id, &state.db_pool).await? {
        Some(user) => user,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    let pagination = pagination.into();
    let total = user.posts_count(&state.db_pool).await?;
    let posts = user.posts(pagination, &state.db_pool).await?;
    let items = PostView::build_from_vec(posts, &state).await?;

    Ok(Json(Page::new(items, total, pagination)).into_response())
}

pub fn accounts(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/me",
            get(http_get_me.layer(from_fn_with_state(Arc::clone(state), auth_middleware))).patch(
                http_patch_me.layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
            ),
        )
        .route("/accounts/:id", get(http_get_account))
        .route("/accounts/:id/posts", get(http_get_account_posts))
}
