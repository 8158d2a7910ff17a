use std::sync::Arc;

use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use db::models::{Session, User};
use serde::{Deserialize, Serialize};
use web::{errors::AppError, AppState};

use crate::{
    auth_middleware::auth_middleware,
    common::users,
    entities::{Account, Token},
    error::ApiError,
};

#[derive(Deserialize)]
pub struct RegisterBody {
    username: String,
    email: String,
    password: String,
    display_name: Option<String>,
}

pub async fn http_post_register(
    state: State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if !users::valid_username(&body.username) {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Username must be 1-50 characters of a-z, 0-9, _, . or -",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    if !users::valid_email(&body.email) {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Invalid email address",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    if !users::valid_password(&body.password) {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Password must be at least 8 characters",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    if User::by_name(&body.username, &state.db_pool).await?.is_some() {
        return Ok(ApiError::new("Username already taken", StatusCode::BAD_REQUEST).into_response());
    }

    if User::by_email(&body.email, &state.db_pool).await?.is_some() {
        return Ok(
            ApiError::new("Email already registered", StatusCode::BAD_REQUEST).into_response(),
        );
    }

    let user = users::register(
        body.username,
        body.email,
        body.password,
        body.display_name,
        &state,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(Account::build(user, &state, true).await?),
    )
        .into_response())
}

#[derive(Deserialize)]
pub struct LoginBody {
    username: String,
    password: String,
}

pub async fn http_post_login(
    state: State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::by_name(&body.username, &state.db_pool).await?;

    if let Some(user) = user {
        if users::verify_password(&body.password, &user.password_encrypted) {
            let session = Session::create(user.id, &state.db_pool).await?;
            return Ok(Json(Token::new(session)).into_response());
        }
    }

    Ok(ApiError::new("Invalid username or password", StatusCode::UNAUTHORIZED).into_response())
}

#[derive(Serialize)]
struct EmptyJsonObject {}

pub async fn http_post_logout(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    session.delete(&state.db_pool).await?;
    Ok(Json(EmptyJsonObject {}).into_response())
}

pub fn auth(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(http_post_register))
        .route("/auth/login", post(http_post_login))
        .route(
            "/auth/logout",
            post(http_post_logout.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
}
