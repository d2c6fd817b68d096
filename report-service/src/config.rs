use serde::Deserialize;
use std::{fs, path::PathBuf};

fn default_poll_interval_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for arriving generation report files.
    pub input_dir: PathBuf,
    /// Directory result documents are written to.
    pub output_dir: PathBuf,
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Reference document with the category factor tables.
    pub reference_data_path: PathBuf,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("REPORT_CONFIG").unwrap_or_else(|_| "report-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}
