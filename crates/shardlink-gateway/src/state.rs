use std::sync::Arc;

use shardlink_core::Shortlinker;

#[derive(Clone)]
pub struct AppState {
    shortlinker: Arc<dyn Shortlinker>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortlinker: Arc<dyn Shortlinker>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortlinker,
            base_url: public_base_url.into().into(),
        }
    }

    pub fn shortlinker(&self) -> &dyn Shortlinker {
        self.shortlinker.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
