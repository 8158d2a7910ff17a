use std::sync::Arc;

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use db::{
    models::{category::CategoryUpdate, Category},
    types::DbId,
};
use serde::{Deserialize, Serialize};
use web::{errors::AppError, AppState};

use crate::{auth_middleware::admin_middleware, entities::CategoryView, error::ApiError};

pub async fn http_get_list(state: State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let categories = Category::all(&state.db_pool).await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryView::new)
            .collect::<Vec<CategoryView>>(),
    )
    .into_response())
}

#[derive(Deserialize)]
pub struct NewCategoryBody {
    name: String,
    description: Option<String>,
}

pub async fn http_post_create(
    state: State<Arc<AppState>>,
    Json(body): Json<NewCategoryBody>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.name.trim().to_string();
    if name.is_empty() || name.len() > 50 {
        return Ok(ApiError::new_with_description(
            "Validation failed",
            "Name must be 1-50 characters",
            StatusCode::BAD_REQUEST,
        )
        .into_response());
    }

    if Category::by_name(&name, &state.db_pool).await?.is_some() {
        return Ok(
            ApiError::new("Category already exists", StatusCode::BAD_REQUEST).into_response(),
        );
    }

    let category = Category::create(name, body.description, &state.db_pool).await?;

    Ok((StatusCode::CREATED, Json(CategoryView::new(category))).into_response())
}

#[derive(Deserialize)]
pub struct UpdateCategoryBody {
    name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    description: Option<Option<String>>,
}

pub async fn http_patch(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCategoryBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let category = match Category::by_id(&id, &state.db_pool).await? {
        Some(category) => category,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    if let Some(name) = &body.name {
        let name = name.trim();
        if name.is_empty() || name.len() > 50 {
            return Ok(ApiError::new_with_description(
                "Validation failed",
                "Name must be 1-50 characters",
                StatusCode::BAD_REQUEST,
            )
            .into_response());
        }

        match Category::by_name(name, &state.db_pool).await? {
            Some(existing) if existing.id != category.id => {
                return Ok(
                    ApiError::new("Category already exists", StatusCode::BAD_REQUEST)
                        .into_response(),
                )
            }
            _ => {}
        }
    }

    category
        .update(
            CategoryUpdate {
                name: body.name.map(|name| name.trim().to_string()),
                description: body.description,
            },
            &state.db_pool,
        )
        .await?;

    match Category::by_id(&id, &state.db_pool).await? {
        Some(category) => Ok(Json(CategoryView::new(category)).into_response()),
        None => Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response()),
    }
}

#[derive(Serialize)]
struct EmptyJsonObject {}

pub async fn http_delete(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);

    let category = match Category::by_id(&id, &state.db_pool).await? {
        Some(category) => category,
        None => {
            return Ok(ApiError::new("Record not found", StatusCode::NOT_FOUND).into_response())
        }
    };

    category.delete(&state.db_pool).await?;
    Ok(Json(EmptyJsonObject {}).into_response())
}

pub fn categories(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/categories",
            get(http_get_list).post(
                http_post_create.layer(from_fn_with_state(Arc::clone(state), admin_middleware)),
            ),
        )
        .route(
            "/categories/:id",
            axum::routing::patch(
                http_patch.layer(from_fn_with_state(Arc::clone(state), admin_middleware)),
            )
            .delete(http_delete.layer(from_fn_with_state(Arc::clone(state), admin_middleware))),
        )
}
