mod context;
mod env;
mod file;

pub use context::*;
pub use env::*;
pub use file::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Main CLI configuration structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CliConfig {
    pub contexts: HashMap<String, ContextConfig>,
    pub current_context: String,
}

/// Configuration for a specific context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContextConfig {
    /// Base URL of the catalog service
    pub api_url: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut contexts = HashMap::new();
        contexts.insert(
            "default".to_string(),
            ContextConfig {
                api_url: Some(DEFAULT_API_URL.to_string()),
            },
        );

        Self {
            contexts,
            current_context: "default".to_string(),
        }
    }
}

impl CliConfig {
    /// Get the current context configuration
    pub fn current_context(&self) -> Option<&ContextConfig> {
        self.contexts.get(&self.current_context)
    }

    /// Get a specific context configuration
    pub fn get_context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }

    /// Set the current context
    pub fn set_current_context(&mut self, name: String) -> Result<()> {
        if !self.contexts.contains_key(&name) {
            return Err(anyhow::anyhow!("Context '{}' does not exist", name));
        }
        self.current_context = name;
        Ok(())
    }

    /// Update or create a context
    pub fn set_context(&mut self, name: String, config: ContextConfig) {
        self.contexts.insert(name, config);
    }

    pub fn list_contexts(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.contexts.keys().collect();
        names.sort();
        names
    }
}

/// Picks the service URL: explicit flag, then environment, then the
/// current context, then the built-in default.
pub fn resolve_api_url(
    flag: Option<&str>,
    env: &EnvOverrides,
    context: Option<&ContextConfig>,
) -> String {
    flag.map(str::to_string)
        .or_else(|| env.api_url.clone())
        .or_else(|| context.and_then(|c| c.api_url.clone()))
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Load or create configuration from a specific path
pub async fn load_or_create_config_from_path(
    config_path: &std::path::Path,
) -> Result<CliConfig> {
    match file::load_config_from_path(config_path).await {
        Ok(config) => Ok(config),
        Err(_) => {
            let config = CliConfig::default();
            file::save_config_to_path(&config, config_path).await?;
            Ok(config)
        }
    }
}
