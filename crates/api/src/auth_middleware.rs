use std::sync::Arc;

use axum::{
    extract::{State, TypedHeader},
    headers::authorization::{Authorization, Bearer},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::Session;
use web::AppState;

use crate::error::ApiError;

pub async fn auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    let session = Session::by_token(auth.token(), &state.db_pool).await;
    if let Ok(Some(session)) = session {
        request.extensions_mut().insert(session);
        Ok(next.run(request).await)
    } else {
        Err(ApiError::new(
            "This method requires an authenticated user",
            StatusCode::UNPROCESSABLE_ENTITY,
        ))
    }
}

pub async fn optional_auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    let session = match auth {
        Some(TypedHeader(auth)) => Session::by_token(auth.token(), &state.db_pool)
            .await
            .unwrap_or(None),
        None => None,
    };
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Back-office guard: a valid session whose user is not an admin gets 403.
pub async fn admin_middleware<B>(
    State(state): State<Arc<AppState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    let session = match Session::by_token(auth.token(), &state.db_pool).await {
        Ok(Some(session)) => session,
        _ => {
            return Err(ApiError::new(
                "This method requires an authenticated user",
                StatusCode::UNPROCESSABLE_ENTITY,
            ))
        }
    };

    match session.user(&state.db_pool).await {
        Ok(user) if user.admin => {
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
        Ok(_) => Err(ApiError::new(
            "This method requires an admin user",
            StatusCode::FORBIDDEN,
        )),
        Err(_) => Err(ApiError::new(
            "This method requires an authenticated user",
            StatusCode::UNPROCESSABLE_ENTITY,
        )),
    }
}
