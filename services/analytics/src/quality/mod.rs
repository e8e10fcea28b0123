pub mod service;

pub use service::{QualityAnalyticsService, RecomputeSummary};
