mod helpers;
mod route_api;
mod statistics_api;
mod tour_api;
mod tour_log_api;
mod transfer_api;

use std::sync::Arc;

use crate::{
    api::API,
    config::Config,
    db::{MemoryStore, PgStore, TourStore},
    error::Error,
    external::OpenRouteService,
    routing::RouteResolver,
};

pub struct Engine {
    resolver: RouteResolver,
    store: Arc<dyn TourStore>,
}

impl Engine {
    /// Builds the engine from configuration. Without a database URL tours are
    /// kept in memory for the life of the process.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let service = OpenRouteService::new(&config.ors)?;

        let store: Arc<dyn TourStore> = match &config.database_url {
            Some(url) => Arc::new(PgStore::new(url, config.database_max_connections).await?),
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_parts(RouteResolver::with_service(service), store))
    }

    pub fn with_parts(resolver: RouteResolver, store: Arc<dyn TourStore>) -> Self {
        Self { resolver, store }
    }
}

impl API for Engine {}

#[test]
fn new_engine_without_database() {
    use crate::config::OpenRouteServiceConfig;
    use tokio_test::block_on;

    let config = Config {
        ors: OpenRouteServiceConfig::new("http://127.0.0.1:9", "key"),
        database_url: None,
        database_max_connections: 1,
        bind_addr: ([127, 0, 0, 1], 0).into(),
    };

    let engine = block_on(Engine::new(&config)).unwrap();
    assert!(block_on(engine.store.list_tours()).unwrap().is_empty());
}
