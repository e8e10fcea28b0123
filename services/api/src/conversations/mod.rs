pub mod handlers;
pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quality/conversations", get(handlers::list_conversations))
        .route(
            "/quality/conversations/{id}",
            get(handlers::get_conversation),
        )
}
