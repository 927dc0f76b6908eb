//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/generator traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use formcraft_core::service::form::FormService;
use formcraft_core::service::submission::SubmissionService;
use formcraft_infra::config::{database_url, load_global_config, resolve_data_dir};
use formcraft_infra::ollama::OllamaGenerator;
use formcraft_infra::sqlite::form::SqliteFormRepository;
use formcraft_infra::sqlite::pool::DatabasePool;
use formcraft_infra::sqlite::submission::SqliteSubmissionRepository;
use formcraft_types::config::{GlobalConfig, ModelConfig};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteFormService = FormService<SqliteFormRepository, OllamaGenerator>;

pub type ConcreteSubmissionService =
    SubmissionService<SqliteFormRepository, SqliteSubmissionRepository>;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct ModelOverrides {
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ModelOverrides {
    pub fn apply(&self, config: &mut ModelConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
    }
}

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub form_service: Arc<ConcreteFormService>,
    pub submission_service: Arc<ConcreteSubmissionService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init(overrides: &ModelOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_global_config(&data_dir).await;
        overrides.apply(&mut config.model);

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let form_repo = SqliteFormRepository::new(db_pool.clone());
        let submission_repo = SqliteSubmissionRepository::new(db_pool.clone());
        let generator = OllamaGenerator::new(&config.model)?;

        tracing::debug!(
            endpoint = %config.model.endpoint,
            model = %config.model.name,
            timeout_secs = config.model.timeout_secs,
            "text generator configured"
        );

        let form_service = FormService::new(form_repo.clone(), generator);
        let submission_service = SubmissionService::new(form_repo, submission_repo);

        Ok(Self {
            form_service: Arc::new(form_service),
            submission_service: Arc::new(submission_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}
