mod auth;
mod browse;
mod context;
mod mine;
mod products;
mod reference;

pub use auth::*;
pub use browse::*;
pub use context::*;
pub use mine::*;
pub use products::*;
pub use reference::*;

use crate::client::HttpClient;
use crate::config::{
    ContextManager, EnvOverrides, get_session_file_path, resolve_api_url,
};
use crate::session::{FileTokenStore, Session, TokenStore};
use crate::types::ConnectionArgs;
use std::sync::Arc;
use tracing::debug;


/// Session and API client wired to the current context.
pub struct App {
    pub session: Session,
    pub api: HttpClient,
}

impl App {
    pub async fn connect(conn: &ConnectionArgs) -> anyhow::Result<Self> {
        let manager = ContextManager::new().await?;
        let api_url = resolve_api_url(
            conn.api_url.as_deref(),
            &EnvOverrides::from_env(),
            manager.get_current_context(),
        );
        debug!("using catalog service at {api_url}");

        let tokens: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::open(get_session_file_path()?)?);
        let api = HttpClient::new(api_url, tokens.clone())?;
        Ok(Self {
            session: Session::new(tokens),
            api,
        })
    }
}
