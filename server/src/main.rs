/// Surprise Travel HTTP server
///
/// Exposes the travel planning capability to orchestration platforms:
/// - POST /plan-surprise-trip — structured planning envelope
/// - POST /chat/completions   — OpenAI-compatible, with SSE streaming
/// - GET  /, /health, /agents — static service descriptors
///
/// Live pipeline runs require TRAVEL_API_KEY (see travel-crew); without
/// it every route falls back to the deterministic renderer.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use travel_crew::CrewConfig;

mod api;
mod chat;

/// Shared per-process state: one HTTP client and the optional provider
/// configuration. Requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub crew: Option<CrewConfig>,
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║          AI Travel Planning Team - HTTP Server             ║");
    println!("║   Activity Planner · Restaurant Scout · Itinerary Compiler ║");
    println!("╚════════════════════════════════════════════════════════════╝\n");

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);

    let crew = match CrewConfig::from_env() {
        Ok(config) => {
            println!("[INIT] Live agent pipeline enabled");
            println!("  Model: {}", config.model_id);
            println!("  Provider: {}", config.api_url);
            Some(config)
        }
        Err(_) => {
            println!("[INIT] TRAVEL_API_KEY not set, using deterministic itineraries");
            None
        }
    };

    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        crew,
    });

    let app = Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/agents", get(api::agents))
        .route("/plan-surprise-trip", post(api::plan_surprise_trip))
        .route("/chat/completions", post(chat::chat_completions))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind listener");

    println!("[STARTUP] ✓ Travel server running on http://0.0.0.0:{}", port);
    println!("  POST /plan-surprise-trip — Plan a trip (structured envelope)");
    println!("  POST /chat/completions   — OpenAI-compatible chat (stream or not)");
    println!("  GET  /agents             — Agent team descriptor");
    println!("  GET  /health             — Liveness check\n");

    if let Err(e) = axum::serve(listener, app).await {
        println!("[FATAL] Server failed: {}", e);
    }
}
