use interview_queue::{
    build_state,
    config::{get_config, init_config},
    open_key_value_store, routes,
    services::arrival_service::run_arrival_worker,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("interview_queue=info,tower_http=info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    info!(backend = ?config.storage_backend, key = %config.store_key, "Opening candidate store");
    let kv = open_key_value_store(config).await?;
    let (app_state, arrival_rx) =
        build_state(kv, &config.store_key, config.arrival_queue_capacity).await;

    {
        let candidates = app_state.candidate_service.clone();
        tokio::spawn(run_arrival_worker(arrival_rx, candidates));
    }

    let app = routes::router(app_state, config.arrival_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
