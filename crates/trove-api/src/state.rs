//! Application state.
//!
//! All collaborators are constructed once at startup and injected here; no
//! component reaches for globals. Swapping the storage backend or the
//! repository in tests is a matter of building a different `AppState`.

use std::sync::Arc;
use trove_core::Config;
use trove_storage::Storage;

use crate::repository::AssetImageRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub images: Arc<dyn AssetImageRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        images: Arc<dyn AssetImageRepository>,
    ) -> Self {
        AppState {
            config,
            storage,
            images,
        }
    }
}
