//! State

use std::sync::Arc;

use kiosk_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Shared secret the admin surface authenticates with.
    pub(crate) admin_token: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token: String) -> Self {
        Self { app, admin_token }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, admin_token: String) -> Arc<Self> {
        Arc::new(Self::new(app, admin_token))
    }
}
