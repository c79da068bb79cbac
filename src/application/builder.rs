use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api::router::AppState;
use crate::application::{ports::AnimeRepository, use_cases::AnimeQueryService};
use crate::config::Config;
use crate::infrastructure::persistence::{PostgresAnimeRepository, TimedAnimeRepository};

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    anime_repo: Option<Arc<dyn AnimeRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            anime_repo: None,
        }
    }

    /// Initialize database connection pool with retry logic
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&self.config.database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    tracing::warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay,
                        retries,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            "Database pool configured: max={}, min={}, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.config.db_max_connections,
            self.config.db_min_connections,
            self.config.db_acquire_timeout_secs,
            self.config.db_idle_timeout_secs,
            self.config.db_max_lifetime_secs
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize the persistence adapter, bounded by the query timeout
    pub fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;

        let postgres: Arc<dyn AnimeRepository> =
            Arc::new(PostgresAnimeRepository::new(pool.clone()));
        let anime_repo: Arc<dyn AnimeRepository> = Arc::new(TimedAnimeRepository::new(
            postgres,
            Duration::from_millis(self.config.query_timeout_ms),
        ));

        self.anime_repo = Some(anime_repo);
        info!(
            query_timeout_ms = self.config.query_timeout_ms,
            "Infrastructure layer initialized"
        );
        Ok(self)
    }

    /// Use a ready-made repository instead of Postgres
    pub fn with_repository(mut self, anime_repo: Arc<dyn AnimeRepository>) -> Self {
        self.anime_repo = Some(anime_repo);
        self
    }

    /// Build application state
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let anime_repo = self.anime_repo.ok_or("Anime repository not initialized")?;

        let policy = self.config.paging_policy();
        policy.validate()?;

        let anime_service = Arc::new(AnimeQueryService::with_policy(anime_repo, policy));
        info!("Application layer initialized");

        Ok(AppState {
            anime_service,
            max_body_bytes: self.config.max_body_bytes,
            allowed_origins: self.config.allowed_origins.clone(),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
