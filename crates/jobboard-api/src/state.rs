//! Application state.

use std::sync::Arc;

use jobboard_store::Stores;

use crate::config::AppConfig;
use crate::services::notify::Notifier;
use crate::services::sheets::SheetsTracker;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub admin_password: Option<Arc<str>>,
    pub notifier: Arc<Notifier>,
    pub tracker: Arc<SheetsTracker>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let stores = Stores::from_config(&config.store);
        let notifier = Arc::new(Notifier::new(config.resend.clone()));
        let tracker = Arc::new(SheetsTracker::new(
            config.sheets.clone(),
            config.store.google.clone(),
        ));

        Self {
            stores,
            admin_password: config.admin_password.as_deref().map(Arc::from),
            notifier,
            tracker,
        }
    }
}
