mod campaigns;
mod conversations;
mod error;
mod extractors;
mod goals;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use callscope_common::types::ServiceInfo;
use callscope_config::{init_tracing, AppConfig};
use callscope_db::goals::pg_repository::PgGoalRepository;
use callscope_db::quality::pg_repository::PgQualityRepository;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub quality_repo: PgQualityRepository,
    pub goal_repo: PgGoalRepository,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("callscope-api"))
}

async fn metrics() -> impl IntoResponse {
    let body = format!(
        "# HELP callscope_up Service up indicator\n\
         # TYPE callscope_up gauge\n\
         callscope_up 1\n\
         # HELP callscope_info Service info\n\
         # TYPE callscope_info gauge\n\
         callscope_info{{service=\"callscope-api\",version=\"{}\"}} 1\n",
        env!("CARGO_PKG_VERSION")
    );

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            "x-org-id".parse().unwrap(),
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(campaigns::router())
        .merge(conversations::router())
        .merge(goals::router())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "callscope-api", "starting");

    let pool = callscope_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    let state = AppState {
        quality_repo: PgQualityRepository::new(pool.clone()),
        goal_repo: PgGoalRepository::new(pool),
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
