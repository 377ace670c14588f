use std::sync::Arc;

use crate::db::PollStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub refresh_interval_secs: u64,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>, refresh_interval_secs: u64) -> Self {
        Self {
            store,
            refresh_interval_secs,
        }
    }
}
