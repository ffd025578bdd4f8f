use std::sync::Arc;

use omdb::OmdbClient;
use reqwest::Client;

use crate::config::Config;
use crate::services::{CatalogService, ChartService};

/// Catalog service backed by the real OMDb client.
pub type Catalog = CatalogService<OmdbClient>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
    pub catalog: Arc<Catalog>,
    pub charts: Arc<ChartService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(config.http_timeout()).build()?;

        let omdb = OmdbClient::with_client(http_client.clone(), &config.omdb_api_key)
            .with_base_url(&config.omdb_base_url);
        let catalog = Arc::new(CatalogService::new(omdb, config.max_pages));
        let charts = Arc::new(ChartService::new(config.static_dir.clone()));

        Ok(Self {
            config: Arc::new(config),
            http_client,
            catalog,
            charts,
        })
    }
}
