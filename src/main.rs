use tracing::info;

use rag_chat_devserver::config::ServerConfig;
use rag_chat_devserver::responder::DevResponder;
use rag_chat_devserver::{chat_service, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_chat_devserver=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let svc = chat_service(DevResponder::new(config.reply_prefix.clone()));
    let app = router(svc);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dev backend listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
