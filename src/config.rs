use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "ghprofile.toml";
pub const ENV_PREFIX: &str = "GHPROFILE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the GitHub REST API.
    pub api_url: String,
    /// Upper bound for each of the two requests.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Where the SVG chart sheets are written.
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 10,
            user_agent: concat!("ghprofile/", env!("CARGO_PKG_VERSION")).to_string(),
            out_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Defaults, then `ghprofile.toml` if present, then `GHPROFILE_*`
    /// environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
