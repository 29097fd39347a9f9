use std::sync::Arc;

use crate::store::FormStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn FormStore>,
}
