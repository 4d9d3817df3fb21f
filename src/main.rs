//! HiveWatch Dashboard Backend
//!
//! Demo security-operations server: synthetic honeypot traffic, heuristic
//! phishing scoring, and randomized deepfake verdicts flow through one
//! correlation pipeline into an in-memory store and out to live viewers.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         HIVEWATCH                             │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────┐  ┌──────────────────────────┐ │
//! │  │  API      │  │  Honeypot  │  │  Stats Publisher         │ │
//! │  │  (Axum)   │  │  Simulators│  │  (Periodic Broadcast)    │ │
//! │  └─────┬─────┘  └─────┬──────┘  └────────────┬─────────────┘ │
//! │        └──────────────┼────────────────────── │               │
//! │                       ▼                       │               │
//! │                ┌────────────┐                 │               │
//! │                │ Correlator │────────────┐    │               │
//! │                └─────┬──────┘            ▼    ▼               │
//! │                      ▼               ┌──────────────┐         │
//! │               ┌────────────┐         │   Notifier   │──► /ws  │
//! │               │ EventStore │         │  (fan-out)   │         │
//! │               └────────────┘         └──────────────┘         │
//! └───────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod store;
mod policy;
mod collab;
mod correlator;
mod notifier;
mod tasks;
mod publisher;
mod simulator;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use collab::{HeuristicClassifier, LogMailer, RandomizedDetector, StaticGeoLocator};
use correlator::Correlator;
use notifier::Notifier;
use store::EventStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "hivewatch=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("HiveWatch server starting...");

    // Build the pipeline: store and notifier are shared, the correlator
    // owns the collaborator wiring
    let store = Arc::new(EventStore::new());
    let notifier = Arc::new(Notifier::new());
    let correlator = Arc::new(Correlator::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Arc::new(HeuristicClassifier::new()),
        Arc::new(RandomizedDetector::new()),
        Arc::new(StaticGeoLocator::new()),
        Arc::new(LogMailer::new()),
    ));

    // Background tasks; handles keep the timers alive until shutdown
    let _stats_publisher = publisher::start(
        Arc::clone(&store),
        Arc::clone(&notifier),
        config.stats_interval,
    );
    let _simulators = if config.simulators_enabled {
        Some(simulator::start(Arc::clone(&correlator), &config))
    } else {
        tracing::info!("Honeypot simulators disabled");
        None
    };

    // Build application state
    let state = AppState {
        store,
        notifier,
        correlator,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    pub notifier: Arc<Notifier>,
    pub correlator: Arc<Correlator>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))

        // Detection submissions
        .route("/api/v1/phishing/analyze", post(handlers::analysis::analyze_email))
        .route("/api/v1/deepfake/analyze", post(handlers::analysis::analyze_media))

        // Honeypot
        .route("/api/v1/honeypot/attacks", post(handlers::honeypot::submit_attack))
        .route("/api/v1/honeypot/logs", get(handlers::honeypot::list_logs))
        .route("/api/v1/honeypot/stats", get(handlers::honeypot::get_stats))

        // Alerts
        .route("/api/v1/alerts", get(handlers::alerts::list))
        .route("/api/v1/alerts/counts", get(handlers::alerts::counts))
        .route("/api/v1/alerts/:id/read", put(handlers::alerts::mark_read))
        .route("/api/v1/alerts/read-all", put(handlers::alerts::mark_all_read))

        // Stats
        .route("/api/v1/stats", get(handlers::stats::get))

        // Live feed
        .route("/ws", get(handlers::feed::upgrade))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
