use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ColloquyConfig {
    pub api_port: u16,
    pub paths: ColloquyPaths,
    pub auth: AuthConfig,
}

impl ColloquyConfig {
    pub fn from_env() -> Result<Self> {
        let paths = ColloquyPaths::discover()?;
        let api_port = env::var("COLLOQUY_API_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);
        let auth = AuthConfig::from_env();
        Ok(Self {
            api_port,
            paths,
            auth,
        })
    }

    pub fn new(api_port: u16, paths: ColloquyPaths, auth: AuthConfig) -> Self {
        Self {
            api_port,
            paths,
            auth,
        }
    }
}

/// Token signing material and lifetimes. The baked-in keys are development
/// fallbacks; deployments set the `COLLOQUY_*` variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_token_key: String,
    pub refresh_token_key: String,
    pub access_token_age_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_key: "colloquy-dev-access-key".into(),
            refresh_token_key: "colloquy-dev-refresh-key".into(),
            access_token_age_secs: 3000,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let access_token_key = env::var("COLLOQUY_ACCESS_TOKEN_KEY")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.access_token_key);
        let refresh_token_key = env::var("COLLOQUY_REFRESH_TOKEN_KEY")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.refresh_token_key);
        let access_token_age_secs = env::var("COLLOQUY_ACCESS_TOKEN_AGE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.access_token_age_secs);
        Self {
            access_token_key,
            refresh_token_key,
            access_token_age_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ColloquyPaths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl ColloquyPaths {
    pub fn discover() -> Result<Self> {
        let exe_path = std::env::current_exe()
            .map_err(|err| anyhow!("failed to resolve current executable: {err}"))?;
        let base = exe_path
            .parent()
            .ok_or_else(|| anyhow!("executable path missing parent"))?
            .to_path_buf();
        Self::from_base_dir(base)
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let data_dir = base.join("data");
        let db_path = data_dir.join("colloquy.db");
        let logs_dir = base.join("logs");

        Ok(Self {
            base,
            data_dir,
            db_path,
            logs_dir,
        })
    }
}
