//! Vineyard Dashboard - local web server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vineyard_dashboard::{create_app, AppState, Config, Dataset};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vineyard_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Vineyard Dashboard");
    tracing::info!("Environment: {}", config.environment);

    // The dashboard has nothing to show without data
    let dataset = Dataset::load(&config.data.path)?;

    let addr = (config.server.host.clone(), config.server.port);
    let state = AppState::new(dataset, config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
