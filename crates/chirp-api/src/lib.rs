pub mod auth;
pub mod error;
pub mod feed;
pub mod flash;
pub mod middleware;
pub mod posts;
pub mod session;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use chirp_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub session_secret: String,
}

/// Build the full application router. Constructed once at startup and in
/// integration tests; all handlers receive the shared state explicitly.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(feed::index))
        .route(
            "/registration",
            get(auth::registration_page).post(auth::register),
        )
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/posts", get(posts::posts_page).post(posts::create_post))
        .route("/profile/{user_handle}", get(feed::profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_login,
        ))
        .with_state(state);

    Router::new().merge(public).merge(protected)
}
