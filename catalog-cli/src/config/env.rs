use envconfig::Envconfig;
use tracing::warn;

/// Settings that may be overridden from the environment.
#[derive(Debug, Clone, Default, Envconfig)]
pub struct EnvOverrides {
    #[envconfig(from = "CATALOG_API_URL")]
    pub api_url: Option<String>,

    #[envconfig(from = "CATALOG_CONFIG_DIR")]
    pub config_dir: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::init_from_env().unwrap_or_else(|e| {
            warn!("Ignoring environment overrides: {e}");
            Self::default()
        })
    }
}
