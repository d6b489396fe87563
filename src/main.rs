use {
    axum::extract::DefaultBodyLimit,
    payhook::{
        AppState,
        adapters::http,
        domain::config::{GatewayConfig, SharedConfig},
        infra::memory::InMemoryStore,
        services::locks::OrderLocks,
    },
    std::{env, sync::Arc, time::Duration},
    tokio::signal,
    tower_http::timeout::TimeoutLayer,
    url::Url,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = config_from_env();
    if config.route_id.is_empty() {
        tracing::warn!("ROUTE_ID is not set; checkout will be refused until it is configured");
    }
    if config.public_key_pem.is_empty() {
        tracing::warn!("no public key configured; every webhook will fail verification");
    }

    let state = AppState {
        store: Arc::new(InMemoryStore::new()),
        locks: Arc::new(OrderLocks::new()),
        config: SharedConfig::new(config),
    };

    let app = http::router(state)
        .layer(DefaultBodyLimit::max(64 * 1024)) // provider payloads are small
        .layer(TimeoutLayer::new(Duration::from_secs(15)));

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

fn config_from_env() -> GatewayConfig {
    let public_key_pem = env::var("PUBLIC_KEY_PEM").unwrap_or_else(|_| {
        env::var("PUBLIC_KEY_FILE")
            .ok()
            .map(|path| std::fs::read_to_string(&path).expect("failed to read PUBLIC_KEY_FILE"))
            .unwrap_or_default()
    });

    let enabled = env::var("GATEWAY_ENABLED")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(true);

    let pay_page_url: Url = env::var("PAY_PAGE_URL")
        .unwrap_or_else(|_| "https://app.dfx.swiss/pl".to_string())
        .parse()
        .expect("invalid PAY_PAGE_URL");

    let public_base_url: Url = env::var("PUBLIC_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .parse()
        .expect("invalid PUBLIC_BASE_URL");
    let webhook_url = public_base_url
        .join("/webhook")
        .expect("invalid PUBLIC_BASE_URL");
    let return_url = env::var("RETURN_URL")
        .map(|v| v.parse().expect("invalid RETURN_URL"))
        .unwrap_or_else(|_| public_base_url.clone());

    GatewayConfig {
        route_id: env::var("ROUTE_ID").unwrap_or_default(),
        public_key_pem,
        enabled,
        pay_page_url,
        webhook_url,
        return_url,
        checkout_expiry: chrono::Duration::hours(1),
        store_timeout: Duration::from_secs(5),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
