use std::sync::Arc;

use crate::{config::Config, database::Store};

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        Self::from_config(Config::load()).await
    }

    pub async fn from_config(config: Config) -> Arc<Self> {
        let store = Store::connect(
            config.database_url.as_deref(),
            config.database_name.as_deref(),
        )
        .await;

        Arc::new(Self { config, store })
    }
}
