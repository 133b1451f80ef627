//! Vineyard Simulator - generates the dataset read by the dashboard

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vineyard_sim=info,vineyard_simulator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = vineyard_simulator::Config::load()?;
    tracing::info!("Environment: {}", config.environment);

    let summary = vineyard_simulator::run(&config)?;
    tracing::info!(
        path = %summary.path.display(),
        rows = summary.rows,
        seed = summary.seed,
        "Data saved; start the dashboard to explore it"
    );

    Ok(())
}
