use cfn_diagram::config::ServerConfig;
use cfn_diagram::diagram::icons;
use cfn_diagram::{routes, state};
use tracing::Level;

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env().expect("invalid configuration");

    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let state = state::AppState::from_config(&config).expect("renderer init failed");
    let icon_dir = state.renderer.icon_root();
    if icon_dir.is_dir() {
        let missing = icons::missing_icons(icon_dir, &state.registry);
        if !missing.is_empty() {
            tracing::warn!(icon_dir = %icon_dir.display(), missing = ?missing, "icons missing, those resources will render without one");
        }
    } else {
        tracing::warn!(icon_dir = %icon_dir.display(), "icon directory missing, diagrams will render without icons");
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .expect("failed to bind");

    tracing::info!(host = %config.host, port = config.port, engine = %config.graphviz_dot, "cfn-diagram listening");
    axum::serve(listener, app).await.expect("server failed");
}
