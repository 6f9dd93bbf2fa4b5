use anyhow::Context;
use tower_http::cors::CorsLayer;

use mail_triage::config::Config;
use mail_triage::context::AppContext;
use mail_triage::server::{ApiState, api_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("loading configuration")?;

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!("   API: http://{}/process-email", config.bind_addr);

    // Gateway, model cache (pre-warmed) and template catalog are built
    // once here and shared for the life of the process.
    let context = AppContext::initialize(&config).context("initializing pipeline")?;

    let app = api_routes(ApiState {
        classifier: context.classifier,
    })
    // The SPA frontend is served from a different origin.
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}
