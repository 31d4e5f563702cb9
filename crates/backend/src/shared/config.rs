use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    pub dashboard: DashboardConfig,
    pub server: ServerConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub sample_data: SampleDataConfig,
}

/// Locations of the three snapshot CSV files
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    pub velocity_data: String,
    pub revenue_data: String,
    pub compliance_data: String,
}

/// Defaults for the dashboard tunables; requests may override them
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub top_n: usize,
    pub grid_width: u32,
    pub grid_height: u32,
    pub error_sample_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Theme colours handed to the presentation layer as-is
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    pub theme_primary: String,
    pub theme_background: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SampleDataConfig {
    /// Write a synthetic snapshot at startup when a data file is missing
    #[serde(default)]
    pub generate_if_missing: bool,
    pub seed: Option<u64>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r##"
[paths]
velocity_data = "data/product_velocity.csv"
revenue_data = "data/lost_revenue.csv"
compliance_data = "data/planogram_compliance.csv"

[dashboard]
top_n = 10
grid_width = 10
grid_height = 4
error_sample_size = 10

[server]
port = 3000

[ui]
theme_primary = "#6750A4"
theme_background = "#F7F2FA"

[sample_data]
generate_if_missing = true
"##;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(exe_dir) = executable_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return parse_config(&contents);
        } else {
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.dashboard.grid_width == 0 || config.dashboard.grid_height == 0 {
        anyhow::bail!("dashboard.grid_width and dashboard.grid_height must be positive");
    }
    Ok(config)
}

/// Resolve a configured data path
///
/// Absolute paths are used as is; relative ones are resolved against the
/// executable directory, falling back to the current directory.
pub fn resolve_data_path(path: &str) -> PathBuf {
    let data_path = Path::new(path);

    if data_path.is_absolute() {
        return data_path.to_path_buf();
    }

    match executable_dir() {
        Some(exe_dir) => exe_dir.join(data_path),
        None => PathBuf::from(path),
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
