use admin::{
    AppState, MIGRATOR,
    config::{AdminConfig, StorageKind},
    middleware::TokenVerifier,
    repositories::MemoryStore,
    routes,
};
use anyhow::Result;
use common::database::{DatabaseConfig, health_check, init_pool};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AdminConfig::load()?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting admin service");

    let verifier = TokenVerifier::from_config(&config.auth)?;

    let app_state = match config.storage {
        StorageKind::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            if config.database.run_migrations {
                MIGRATOR.run(&pool).await?;
                info!("Database migrations applied");
            }

            AppState::postgres(pool, verifier)
        }
        StorageKind::Memory => {
            warn!("Running with in-memory storage; data is lost on shutdown");
            AppState::memory(MemoryStore::new(), verifier)
        }
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Admin service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
