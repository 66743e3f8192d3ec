use car_config::SETTINGS;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let settings = SETTINGS.clone();
    let listener = TcpListener::bind(settings.bind_addr()).await?;
    info!(
        car_path = %settings.car_path.display(),
        players_path = %settings.players_path.display(),
        storage = %settings.storage_endpoint,
        "listening on {}",
        listener.local_addr()?
    );
    let app = car_gate::app(car_gate::AppState::from_settings(settings));
    axum::serve(listener, app).await?;
    Ok(())
}
