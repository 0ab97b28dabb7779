use common::lifecycle::shutdown_signal;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::client::UserServiceClient;
use crate::routes::build_router;

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let client = UserServiceClient::new(&cfg.downstream.user_service_url)?;
    info!(downstream = client.base_url(), "user-service client ready");
    let app = build_router(client);

    let addr = cfg.video_service.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "video-service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
