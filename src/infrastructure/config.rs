use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct EnhancerConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_refresh_interval_secs")]
    pub interval_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            stats_path: default_stats_path(),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl RefreshSettings {
    /// Tick period for the periodic refresh. A configured zero would panic
    /// the interval timer, so it falls back to the default.
    pub fn interval(&self) -> Duration {
        if self.interval_secs == 0 {
            return Duration::from_secs(default_refresh_interval_secs());
        }
        Duration::from_secs(self.interval_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_stats_path() -> String {
    "/api/dashboard/stats".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    300
}

/// Load the enhancer configuration, falling back to the defaults when the
/// config file is absent.
pub fn load_enhancer_config() -> anyhow::Result<EnhancerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/enhancer").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
