pub mod handlers;
pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/quality/campaigns/{id}/parameters",
            get(handlers::list_campaign_parameters),
        )
        .route(
            "/quality/campaigns/{id}/agents",
            get(handlers::list_campaign_agents),
        )
}
