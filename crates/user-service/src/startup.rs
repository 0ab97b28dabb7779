use std::sync::Arc;

use axum::Router;
use common::lifecycle::shutdown_signal;
use configs::{AppConfig, DatabaseConfig};
use migration::MigratorTrait;
use service::users::repo::seaorm::SeaOrmUserStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{build_router, AppState};

/// Connect the database, optionally migrate, and wrap it in handler state.
pub async fn connect_state(cfg: &DatabaseConfig) -> anyhow::Result<AppState> {
    cfg.validate()?;
    let db = models::db::connect_with_config(cfg).await?;
    if cfg.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }
    Ok(AppState::new(Arc::new(SeaOrmUserStore::new(db))))
}

/// Serve `app` on `listener` until Ctrl+C / SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = connect_state(&cfg.database).await?;
    let app = build_router(state);

    let addr = cfg.user_service.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "user-service listening");
    serve(listener, app).await
}
