//! task-api バイナリのエントリポイント。

use std::sync::Arc;

use task_api::config::Config;
use task_api::db::DynamoStore;
use task_api::handlers::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // 接続失敗してもプロセスは起動を続ける（以降のリクエストは失敗する）
    let store = DynamoStore::connect(&config).await;
    let state = AppState {
        store: Arc::new(store),
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, task_api::app(state))
        .await
        .expect("server error");
}
