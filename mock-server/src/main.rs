use mock_server::MockConfig;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");
    let config = MockConfig {
        base_url: std::env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://{addr}")),
        ..MockConfig::default()
    };

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, base_url = %config.base_url, "mock character service listening");
    let app = mock_server::app_with(config).layer(TraceLayer::new_for_http());
    axum::serve(listener, app).await
}
