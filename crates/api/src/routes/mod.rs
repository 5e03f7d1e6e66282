pub mod health;
pub mod scan;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree with state applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(sync::router())
        .merge(scan::router())
        .with_state(state)
}
