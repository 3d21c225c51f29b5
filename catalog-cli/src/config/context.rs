use super::{CliConfig, ContextConfig, file};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Context management operations
pub struct ContextManager {
    config: CliConfig,
    config_path: PathBuf,
}

impl ContextManager {
    /// Load the configuration from the default location, creating it if
    /// missing.
    pub async fn new() -> Result<Self> {
        Self::with_config_path(file::get_config_file_path()?).await
    }

    pub async fn with_config_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();
        let config = super::load_or_create_config_from_path(&config_path).await?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Save configuration changes
    pub async fn save(&self) -> Result<()> {
        file::save_config_to_path(&self.config, &self.config_path).await
    }

    /// Set context values
    pub async fn set_context(
        &mut self,
        name: Option<String>,
        api_url: Option<String>,
    ) -> Result<()> {
        let context_name =
            name.unwrap_or_else(|| self.config.current_context.clone());

        let mut context = self
            .config
            .get_context(&context_name)
            .cloned()
            .unwrap_or_default();

        if let Some(url) = api_url {
            context.api_url = Some(url);
        }

        self.config.set_context(context_name.clone(), context);

        // A config whose current context vanished adopts the new one
        if !self
            .config
            .contexts
            .contains_key(&self.config.current_context)
        {
            self.config.current_context = context_name;
        }

        self.save().await
    }

    /// Switch to a different context
    pub async fn select_context(&mut self, name: String) -> Result<()> {
        self.config.set_current_context(name)?;
        self.save().await
    }

    /// Get current context configuration
    pub fn get_current_context(&self) -> Option<&ContextConfig> {
        self.config.current_context()
    }
}
