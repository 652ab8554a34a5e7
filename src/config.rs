use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{KeywordRule, PatternSet};

pub const CONFIG_FILE_NAME: &str = ".todotex.toml";

/// Keyword configuration.
///
/// Serialized as two arrays of tables, `[[todo]]` for active keywords and
/// `[[done]]` for resolved ones. Order matters: see [`PatternSet`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(rename = "todo", default)]
    pub active: Vec<KeywordRule>,
    #[serde(rename = "done", default)]
    pub resolved: Vec<KeywordRule>,
}

fn rules(pairs: &[(&str, &str)]) -> Vec<KeywordRule> {
    pairs
        .iter()
        .map(|(key, label)| KeywordRule::new(*key, *label))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active: rules(&[
                ("todo", "TODO"),
                ("TODO", "TODO"),
                ("fixme", "TODO"),
                ("FIXME", "TODO"),
                ("question", "QUESTION"),
                ("problem", "PROBLEM"),
                ("continue here", "TODO"),
                ("continue later", "TODO"),
                (r"continue ?\.{3,}", "TODO"),
            ]),
            resolved: rules(&[
                ("question solved", "SOLVED"),
                ("problem solved", "SOLVED"),
                ("done", "DONE"),
            ]),
        }
    }
}

impl Config {
    /// Compile the keyword rules.
    pub fn patterns(&self) -> Result<PatternSet> {
        PatternSet::compile(&self.active, &self.resolved).context("Invalid keyword configuration")
    }

    /// Validate configuration values.
    ///
    /// Returns an error if the keys do not compile into one pattern.
    pub fn validate(&self) -> Result<()> {
        self.patterns().map(|_| ())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("In config file: {}", path.display()))?;
        Ok(config)
    }
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string(&Config::default()).context("Failed to generate default config.")
}

/// Candidate config files, most specific first.
pub fn config_search_paths(current_dir: &Path, home_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![current_dir.join(CONFIG_FILE_NAME)];
    if let Some(home) = home_dir {
        paths.push(home.join(".config").join("todotex").join("todotex.toml"));
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config was read from; `None` when using defaults.
    pub source: Option<PathBuf>,
}

/// Load the keyword configuration.
///
/// An explicit path must be readable. Otherwise the first existing file of
/// [`config_search_paths`] wins, falling back to [`Config::default`].
pub fn load_config(explicit: Option<&Path>, current_dir: &Path) -> Result<ConfigLoadResult> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        return Ok(ConfigLoadResult {
            config: Config::from_file(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let home = dirs::home_dir();
    for path in config_search_paths(current_dir, home.as_deref()) {
        if path.is_file() {
            return Ok(ConfigLoadResult {
                config: Config::from_file(&path)?,
                source: Some(path),
            });
        }
    }

    Ok(ConfigLoadResult {
        config: Config::default(),
        source: None,
    })
}
