use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::{AppointmentSource, AppointmentState};
use payment_cell::{PaymentLedger, PaymentState};
use queue_cell::{QueueService, RefreshTask};
use shared_config::AppConfig;
use shared_models::StaffSettings;
use shared_storage::LocalStore;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic desk API server");

    // Load configuration and open the local document store
    let config = AppConfig::from_env();
    let store = Arc::new(LocalStore::open(&config.data_dir).unwrap());

    // Wire up the cells over the shared store
    let source = Arc::new(AppointmentSource::new(&config, store.clone()));
    let queue = Arc::new(QueueService::load(store.clone()).unwrap());
    let ledger = Arc::new(PaymentLedger::load(store.clone()).unwrap());

    // Periodic re-read of persisted queue state; aborted on drop. The
    // interval comes from the persisted staff settings document.
    let settings = StaffSettings::load(&store);
    let _refresh = RefreshTask::spawn(queue.clone(), settings.refresh_interval_secs);

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(
        AppointmentState {
            source,
            store: store.clone(),
        },
        queue,
        PaymentState { ledger, store },
    )
    .layer(
        TraceLayer::new_for_http()
            .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
            .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
    )
    .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
