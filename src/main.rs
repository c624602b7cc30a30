mod error;
mod llm;
mod routes;
mod services;
mod state;
mod tools;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .expect("invalid PORT");
    let allowed_origins = allowed_origins_from_env();

    // The generation capability is the whole point of the service; refuse to
    // start without a usable provider configuration.
    let llm = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM configured");
            Arc::new(client) as Arc<dyn llm::GenerateText>
        }
        Err(e) => {
            tracing::error!(error = %e, "LLM configuration failed");
            std::process::exit(1);
        }
    };

    let registry = Arc::new(tools::ToolRegistry::builtin());
    let state = state::AppState::new(registry, llm);

    let app = routes::app(state, &allowed_origins);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "vizboard listening");
    axum::serve(listener, app).await.expect("server failed");
}

/// Comma-separated trusted web origins. The CORS layer allows exactly these.
fn allowed_origins_from_env() -> Vec<String> {
    std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".into())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
