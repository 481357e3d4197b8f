use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::gateway::GatewayFactory;
use crate::session::{SessionState, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Builds a gateway per request from the session's backend settings.
    pub gateways: Arc<dyn GatewayFactory>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, gateways: Arc<dyn GatewayFactory>) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl),
            gateways,
            config,
        }
    }

    /// A controller talking to the backend this session is configured for.
    pub fn dashboard_for(&self, session: &SessionState) -> Dashboard {
        let base_url = session
            .backend_url
            .as_deref()
            .unwrap_or(&self.config.backend_url);
        let gateway = self.gateways.gateway(base_url, session.use_backend);
        Dashboard::new(gateway, self.config.page_size)
    }
}
