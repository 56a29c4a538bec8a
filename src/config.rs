use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DATA_SOURCE: &str = "public/data";
pub const DEFAULT_ORDER_INDEX: &str = "eo-to-billsheet.json";
pub const DEFAULT_BILLTRACK_BASE_URL: &str = "https://www.billtrack50.com/BT50Api/2.1";

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

fn default_order_index() -> String {
    DEFAULT_ORDER_INDEX.to_string()
}

fn default_billtrack_base_url() -> String {
    DEFAULT_BILLTRACK_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Local directory or `http(s)://` base URL holding the order index and bill sheets.
    #[serde(default = "default_data_source")]
    pub data_source: String,
    #[serde(default = "default_order_index")]
    pub order_index: String,
    #[serde(default = "default_billtrack_base_url")]
    pub billtrack_base_url: String,
    #[serde(default)]
    pub billtrack_api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            order_index: default_order_index(),
            billtrack_base_url: default_billtrack_base_url(),
            billtrack_api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/eobills/config.toml"))
}

/// `$HOME/.config/eobills/config.toml` if present, then environment overrides.
pub fn load_config() -> anyhow::Result<Config> {
    let path = config_path()?;
    let mut config = if path.exists() {
        let raw = std::fs::read_to_string(&path)?;
        parse_config(&raw)?
    } else {
        Config::default()
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub fn parse_config(raw: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(raw)?)
}

pub fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
    if let Some(v) = non_empty("EOBILLS_DATA") {
        config.data_source = v;
    }
    if let Some(v) = non_empty("EOBILLS_ORDER_INDEX") {
        config.order_index = v;
    }
    if let Some(v) = non_empty("BILLTRACK50_API_KEY") {
        config.billtrack_api_key = Some(v);
    }
}
