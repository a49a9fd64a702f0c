// src/config.rs

use dotenvy::dotenv;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Percentage of the total marks a score must reach to pass an exam.
pub const PASS_MARK_PERCENT: i64 = 40;

/// Number of entries on an exam leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Number of lowest-accuracy questions flagged for content review.
pub const WEAKEST_QUESTION_LIMIT: usize = 5;

/// Maximum number of daily points in a performance trend.
pub const TREND_MAX_POINTS: usize = 60;

/// Number of topics reported as strengths and as weaknesses.
pub const TOPIC_HIGHLIGHT_COUNT: usize = 3;

/// Topic bucket used when both the question topic and the exam subject are blank.
pub const FALLBACK_TOPIC: &str = "General";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,

    /// Cap on rows returned by the per-exam attempt listing.
    pub attempt_list_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let attempt_list_limit = env::var("ATTEMPT_LIST_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200);

        Self {
            rust_log,
            attempt_list_limit,
        }
    }
}

/// Initializes the global tracing subscriber from the configured filter.
/// Repeated calls keep the first subscriber.
pub fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init();
}
