use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::service::RollcallService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: RollcallService,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(service: RollcallService, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { service, identity }
    }
}
