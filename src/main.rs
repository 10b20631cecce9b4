use budget_planner::config::Config;
use budget_planner::server::{build_app, serve};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budget_planner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        version = budget_planner::VERSION,
        "Starting budget planner on {}",
        config.address()
    );

    let (_state, app) = build_app(&config).expect("Failed to build application");
    let (port, handle) = serve(app, &config.host, config.port)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}:{}", config.host, port);

    handle.await.expect("Server task panicked");
}
