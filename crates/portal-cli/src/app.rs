//! Shared wiring for CLI commands.

use portal_config::{Config, Paths};
use portal_gateway::GatewayClient;
use portal_session::SessionManager;
use portal_storage::TokenVault;
use std::sync::Arc;
use std::time::Duration;

/// Everything a command handler needs: the gateway and the session built
/// over the stored credentials.
pub struct App {
    pub gateway: GatewayClient,
    pub manager: Arc<SessionManager<GatewayClient>>,
}

/// Build the gateway, token vault, and session manager from config.
pub fn build(config: &Config, paths: &Paths) -> anyhow::Result<App> {
    paths.ensure_dirs()?;

    let gateway = GatewayClient::with_timeout(
        config.api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let vault = TokenVault::file(paths.credentials_file())?;
    let manager = Arc::new(SessionManager::new(gateway.clone(), vault));

    Ok(App { gateway, manager })
}
