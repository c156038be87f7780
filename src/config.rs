use crate::remote::RemoteDescriptor;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{fs::File, path::PathBuf, time::Duration};

pub const GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "rust/reqwest";

/// Remote the provider authenticates against.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetRemote {
    pub name: String,
    pub url: String,
}

impl Default for TargetRemote {
    fn default() -> Self {
        Self {
            name: "origin".to_string(),
            url: "https://github.com/microsoft/vscode.git".to_string(),
        }
    }
}

impl TargetRemote {
    pub fn descriptor(&self) -> RemoteDescriptor {
        RemoteDescriptor::new(&self.name, &self.url)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Github {
    pub api: String,
    /// Used by the non-interactive login before falling back to `GITHUB_TOKEN`.
    pub token: Option<String>,
    pub user_agent: String,
    pub per_page: u16,
    /// Request timeout, e.g. `30s` or `1m`.
    pub timeout: String,
}

impl Default for Github {
    fn default() -> Self {
        Self {
            api: GITHUB_API.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            per_page: 30,
            timeout: "30s".to_string(),
        }
    }
}

impl Github {
    pub fn timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.timeout)
            .with_context(|| format!("Invalid github.timeout '{}'", self.timeout))
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub github: Github,
    pub target_remote: TargetRemote,
}

/// `~/.remote-sources.yaml`
pub fn default_config_path() -> Result<PathBuf> {
    let mut home =
        dirs::home_dir().ok_or_else(|| anyhow!("Failed to locate user home directory"))?;
    home.push(".remote-sources.yaml");
    Ok(home)
}

pub fn load_config(path: &str) -> Result<Config> {
    let f = File::open(path).with_context(|| format!("Failed to open config '{}'", path))?;
    let config: Config = serde_yaml::from_reader(f)
        .with_context(|| format!("Failed to parse config '{}'", path))?;
    config.github.timeout()?;
    Ok(config)
}
