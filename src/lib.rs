pub mod clients;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::clients::{HhClient, TvClient};
use crate::error::Result;
use crate::repositories::{PgFavoritesRepository, PgRegionsRepository, PgVacanciesRepository};
use crate::services::{RegionService, VacanciesService};

/// Installs the global tracing subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Wired service graph handed to the transport layer. Construction
/// requires an initialized configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub region_service: RegionService,
    pub vacancies_service: VacanciesService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Result<Self> {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| error::Error::Config(format!("Failed to build HTTP client: {e}")))?;

        let region_service = RegionService::new(Arc::new(PgRegionsRepository::new(pool.clone())));
        let vacancies_service = VacanciesService::new(
            region_service.clone(),
            Arc::new(PgVacanciesRepository::new(pool.clone())),
            Arc::new(PgFavoritesRepository::new(pool.clone())),
            Arc::new(HhClient::new(
                http_client.clone(),
                config.hh_base_url.clone(),
                config.hh_access_token.clone(),
            )),
            Arc::new(TvClient::new(http_client, config.tv_base_url.clone())),
        );

        Ok(Self {
            pool,
            region_service,
            vacancies_service,
        })
    }
}
