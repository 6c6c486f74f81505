//! GatherHub community events service
//!
//! Main application entry point

use tracing::info;

use gatherhub::{
    config::Settings,
    database::{run_migrations, create_pool, DatabaseService},
    handlers::{self, AppState},
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must live until shutdown or the file
    // layer stops flushing
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting GatherHub events service...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize state and router
    let db = DatabaseService::new(db_pool);
    let state = AppState::new(db, settings.clone());
    let app = handlers::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("GatherHub has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("Shutdown signal received");
}
