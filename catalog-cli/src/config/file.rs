use super::{CliConfig, EnvOverrides};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = EnvOverrides::from_env().config_dir {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    Ok(home_dir.join(".catalog"))
}

/// Get the configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yml"))
}

/// File holding the session token
pub fn get_session_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("session.yml"))
}

/// Load configuration from a specific file
pub async fn load_config_from_path(config_path: &Path) -> Result<CliConfig> {
    if !config_path.exists() {
        return Err(anyhow::anyhow!("Configuration file does not exist"));
    }

    let content = fs::read_to_string(config_path)
        .await
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse configuration file")
}

/// Save configuration to a specific file
pub async fn save_config_to_path(
    config: &CliConfig,
    config_path: &Path,
) -> Result<()> {
    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await.with_context(|| {
                format!("Failed to create config directory: {:?}", config_dir)
            })?;
        }
    }

    let content = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration")?;

    fs::write(config_path, content)
        .await
        .with_context(|| format!("Failed to write config file: {:?}", config_path))
}
