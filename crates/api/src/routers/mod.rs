pub mod accounts;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod posts;

use std::sync::Arc;

use axum::Router;
use web::AppState;

pub fn api(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::auth(&state))
        .merge(accounts::accounts(&state))
        .merge(posts::posts(&state))
        .merge(comments::comments(&state))
        .merge(categories::categories(&state))
        .merge(admin::admin(&state))
}
