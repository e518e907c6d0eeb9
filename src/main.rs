use std::net::SocketAddr;
use tokio::fs;
use tooli::{load_data, persist_data, router, AppState, Config, Workspace};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    let mut workspace = Workspace::from_data(data, config.history_limit, config.spin_duration_ms);
    if config.seed_users && workspace.users().count() == 0 {
        workspace.seed_default_users()?;
        persist_data(&config.data_path, &workspace.snapshot()).await?;
    }
    info!(
        path = %config.data_path.display(),
        users = workspace.users().count(),
        spins = workspace.history().len(),
        "state loaded"
    );

    let app = router(AppState::new(config.data_path.clone(), workspace));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
