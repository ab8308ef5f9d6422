//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskhub_auth::JwtDecoder;
use taskhub_core::config::AppConfig;
use taskhub_database::Repositories;
use taskhub_database::repositories::HealthProbe;
use taskhub_service::Services;

/// Passed to every handler via `State<AppState>`. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Services,
    pub jwt_decoder: Arc<JwtDecoder>,
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: &Repositories) -> Self {
        Self {
            services: Services::new(repos, &config.auth),
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            health: Arc::clone(&repos.health),
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}
