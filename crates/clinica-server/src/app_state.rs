use std::sync::Arc;

use clinica_core::traits::RemoteApi;
use clinica_mcp::ToolRegistry;

/// Shared state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub api: Arc<dyn RemoteApi>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: ToolRegistry, api: Arc<dyn RemoteApi>) -> Self {
        Self {
            registry: Arc::new(registry),
            api,
        }
    }
}
