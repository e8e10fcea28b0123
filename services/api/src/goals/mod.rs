pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/goals", get(handlers::list_goals))
        .route("/goals", post(handlers::create_goal))
        .route("/goals/{id}", get(handlers::get_goal))
        .route("/goals/{id}", put(handlers::update_goal))
        .route("/goals/{id}/publish", post(handlers::publish_goal))
}
