use super::SchemaVariant;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SCOUT_DIR: &str = ".flavor-scout";

pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "chocolate",
    "vanilla",
    "kesar",
    "pista",
    "chai",
    "watermelon",
    "blueberry",
    "cocoa",
    "nimbu",
    "orange",
];

/// Every field falls back to its default on its own, so a config file only
/// needs the keys it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScoutConfig {
    pub project_name: String,
    pub model: String,
    pub temperature: f32,
    pub api_base: String,
    pub data_path: PathBuf,
    pub comment_column: String,
    pub keywords: Vec<String>,
    pub schema: SchemaVariant,
    /// Unset means the HTTP client never gives up on its own.
    pub request_timeout_secs: Option<u64>,
}

fn default_temperature() -> f32 {
    0.3
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/social_chatter.csv")
}

fn default_comment_column() -> String {
    "comment".to_string()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            project_name: "flavor-scout".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: default_temperature(),
            api_base: default_api_base(),
            data_path: default_data_path(),
            comment_column: default_comment_column(),
            keywords: default_keywords(),
            schema: SchemaVariant::default(),
            request_timeout_secs: None,
        }
    }
}

impl ScoutConfig {
    pub fn default_path() -> PathBuf {
        Path::new(SCOUT_DIR).join("config.toml")
    }

    /// Missing file gives defaults; a broken file is reported and also gives defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Outcome of `init_workspace`.
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyPresent,
}

/// Writes default config to `config_path` (relative paths resolve against
/// `root`). Configs inside the scout dir also get a `.gitignore` entry.
pub fn init_workspace(root: &Path, config_path: &Path) -> Result<InitOutcome> {
    let target = root.join(config_path);
    if target.exists() {
        return Ok(InitOutcome::AlreadyPresent);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let toml = toml::to_string_pretty(&ScoutConfig::default())?;
    fs::write(&target, toml).with_context(|| format!("Failed to write {}", target.display()))?;

    if !target.starts_with(root.join(SCOUT_DIR)) {
        return Ok(InitOutcome::Created);
    }
    let gitignore_path = root.join(".gitignore");
    let mut gitignore = if gitignore_path.exists() {
        fs::read_to_string(&gitignore_path)?
    } else {
        String::new()
    };
    if !gitignore.contains(SCOUT_DIR) {
        gitignore.push_str(&format!("\n# Flavor Scout\n{}/\n", SCOUT_DIR));
        fs::write(&gitignore_path, gitignore)?;
    }
    Ok(InitOutcome::Created)
}
