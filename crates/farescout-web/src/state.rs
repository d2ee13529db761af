use std::sync::Arc;

use farescout_core::SuggestionEngine;

use crate::auth::RequestAuthenticator;

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SuggestionEngine>,
    pub authenticator: Arc<dyn RequestAuthenticator>,
}
