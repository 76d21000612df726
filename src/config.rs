use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::environment::Environment;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub bell: bool,
    pub env_vars: HashMap<String, String>,
}

impl Config {
    /// Adds the configured variables to `env`, exported to launched programs.
    pub fn apply_env(&self, env: &mut Environment) {
        for (key, value) in &self.env_vars {
            env.set(key, value);
            env.export(key);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "$ ".to_string(),
            bell: true,
            env_vars: HashMap::new(),
        }
    }

    /// `$MINISH_CONFIG`, else `~/.minishrc`.
    pub fn default_path(env: &Environment) -> Option<PathBuf> {
        match env.get("MINISH_CONFIG") {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => env.home().map(|home| home.join(".minishrc")),
        }
    }

    /// Never fails: a missing file means defaults, a broken one is logged
    /// and ignored.
    pub fn load(env: &Environment) -> Config {
        let Some(path) = Self::default_path(env) else {
            return Self::default_config();
        };
        if !path.exists() {
            debug!("no config at {}", path.display());
            return Self::default_config();
        }

        match Self::load_from_file(&path) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("ignoring config {}: {}", path.display(), e);
                Self::default_config()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "bell" => {
                    config.bell = match value.trim() {
                        "true" | "on" | "1" => true,
                        "false" | "off" | "0" => false,
                        _ => return Err(ConfigError::Parse(format!("Line {}: Invalid bool: {}", lineno + 1, line))),
                    };
                }
                k if k.starts_with("env.") && k.len() > "env.".len() => {
                    let var = k.trim_start_matches("env.").to_string();
                    config.env_vars.insert(var, value.to_string());
                }
                k => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, k))),
            }
        }

        Ok(config)
    }
}
