use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) env_filter: String,
    /// Events at or above this severity go to stderr, everything else to
    /// stdout.
    pub(crate) stderr_threshold: LevelFilter,
}

impl Config {
    pub fn new(env_filter: &str, stderr_threshold: LevelFilter) -> Self {
        Self {
            env_filter: env_filter.into(),
            stderr_threshold,
        }
    }

    pub fn with_env_filter(mut self, env_filter: &str) -> Self {
        self.env_filter = env_filter.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_filter: "info".to_string(),
            stderr_threshold: LevelFilter::ERROR,
        }
    }
}
