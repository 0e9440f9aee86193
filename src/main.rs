use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use werd::{load_data, resolve_data_path, router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if !config.has_quran_credentials() {
        info!("QURAN_CLIENT_ID/QURAN_CLIENT_SECRET not set, content routes will fail");
    }

    let data_path = resolve_data_path(&config);
    let data = load_data(&data_path).await;
    info!("store loaded from {}", data_path.display());

    let state = AppState::new(&config, data_path, data)?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
