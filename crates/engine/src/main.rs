//! Mirefell Engine - Main entry point.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mirefell_engine::app::App;
use mirefell_engine::infrastructure::sqlite;
use mirefell_engine::use_cases::{HealthRegeneration, LocationGraph};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mirefell_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mirefell Engine");

    // Load configuration
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "mirefell.db".into());
    let movement_tick_ms: u64 = std::env::var("MOVEMENT_TICK_MS")
        .unwrap_or_else(|_| "2000".into())
        .parse()
        .unwrap_or(2000);
    let regen_interval_secs: u64 = std::env::var("REGEN_INTERVAL_SECS")
        .unwrap_or_else(|_| "60".into())
        .parse()
        .unwrap_or(60);
    let regen_percent: i64 = std::env::var("REGEN_PERCENT")
        .unwrap_or_else(|_| "5".into())
        .parse()
        .unwrap_or(5);

    // Open the database; create the schema and starter world if missing
    tracing::info!(path = %db_path, "Opening database");
    let pool = sqlite::connect(&db_path).await?;
    sqlite::ensure_schema(&pool).await?;

    let locations = sqlite::SqliteLocationRepo::new(pool.clone());
    let items = sqlite::SqliteItemRepo::new(pool.clone());
    let bots = sqlite::SqliteBotRepo::new(pool.clone());
    sqlite::seed_if_empty(&locations, &items, &bots).await?;

    // The world map is built once and shared read-only
    let graph = Arc::new(LocationGraph::load(&locations).await?);

    // Create application
    let app = Arc::new(App::new(
        pool,
        Arc::clone(&graph),
        Duration::from_millis(movement_tick_ms),
    ));

    // Background health regeneration
    let shutdown = CancellationToken::new();
    let regen = HealthRegeneration::new(
        Arc::clone(&app.repositories.players),
        regen_percent,
        Duration::from_secs(regen_interval_secs),
    );
    let regen_task = tokio::spawn(regen.run(shutdown.clone()));

    tracing::info!("Mirefell Engine running, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    shutdown.cancel();
    app.movement.cancel_all();
    let _ = regen_task.await;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
