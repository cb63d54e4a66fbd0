use crate::{metrics, state::AppState};
use axum::Router;

pub mod contact;
pub mod docs;
pub mod health;

pub fn build_router(app_state: &AppState) -> Router {
    Router::new()
        .nest("/health", health::create_router().with_state(app_state.clone()))
        .nest(
            "/contact",
            contact::create_router().with_state(app_state.clone()),
        )
        .nest(
            "/metrics",
            metrics::create_router().with_state(app_state.clone()),
        )
        .nest("/docs", docs::create_router())
}
