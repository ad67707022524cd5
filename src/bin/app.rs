use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use adapter::{
    database::connect_database_with,
    redis::RedisClient,
    store::{MemoryDocumentStore, PgDocumentStore},
};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use kernel::{
    channel::{ErrorChannel, ErrorEvent, EventKind},
    store::DocumentStore,
};
use registry::AppRegistry;
use shared::{
    config::{AppConfig, StoreBackend},
    env::{which, Environment},
};
use tokio::net::TcpListener;
use tower_http::{
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn open_store(app_config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    match app_config.store.backend {
        StoreBackend::Postgres => {
            let pool = connect_database_with(&app_config.database);
            pool.migrate()
                .await
                .context("failed to migrate the documents table")?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory document store; data is lost on shutdown");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

// 権限エラーの記録。開発環境では送信データまで出力し、本番ではパスと操作のみ
fn log_permission_errors(channel: &ErrorChannel) {
    let environment = which();
    channel.subscribe(EventKind::Permission, move |event| {
        let ErrorEvent::Permission(error) = event;
        match environment {
            Environment::Development => tracing::error!(
                path = %error.path,
                operation = %error.operation,
                request_resource_data = ?error.request_resource_data,
                "access rules rejected a request"
            ),
            Environment::Production => tracing::warn!(
                path = %error.path,
                operation = %error.operation,
                "access rules rejected a request"
            ),
        }
    });
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let store = open_store(&app_config).await?;
    let channel = ErrorChannel::new();
    log_permission_errors(&channel);
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);
    if let Err(e) = kv.try_connect().await {
        tracing::warn!(error = %e, "redis is not reachable; sign-in will fail until it is");
    }
    let port = app_config.server.port;

    let registry = AppRegistry::new(store, channel, kv, app_config);

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}
