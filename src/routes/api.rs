//! Entity routes. Each family maps a plural list path and a singular item path onto the generic handlers.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::model::{Candidates, Parties, Resource, Voters};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

fn family<R: Resource>(plural: &str, singular: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/{}", plural), get(list::<R>))
        .route(&format!("/{}", singular), post(create::<R>))
        .route(
            &format!("/{}/:id", singular),
            get(read::<R>).put(update::<R>).delete(delete::<R>),
        )
}

/// Candidate, party and voter families, to be nested under `/api`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(family::<Candidates>("candidates", "candidate"))
        .merge(family::<Parties>("parties", "party"))
        .merge(family::<Voters>("voters", "voter"))
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Full application: operational routes, `/api` families and a body limit.
/// Any path or verb without a route gets an empty 404, never a 405.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}
