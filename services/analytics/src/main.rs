mod quality;

use std::time::Duration;

use callscope_config::{init_tracing, AppConfig};
use callscope_db::quality::pg_repository::PgQualityRepository;

use quality::QualityAnalyticsService;

const DEFAULT_INTERVAL_SECS: u64 = 300;

fn recompute_interval() -> Duration {
    let secs = std::env::var("ANALYTICS_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    Duration::from_secs(secs)
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "callscope-analytics", "starting");

    let pool = callscope_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");
    let service = QualityAnalyticsService::new(PgQualityRepository::new(pool));

    let interval = recompute_interval();
    tracing::info!(interval_secs = interval.as_secs(), "recompute loop ready");

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = service.recompute_all().await {
                    tracing::error!(error = %e, "recompute pass failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }
}
