//! タスクリストの HTTP API（axum）。
//!
//! `/api/tasks` 配下に CRUD の 4 ルート、`/ok` に liveness を提供する。
//! ストアは [`handlers::AppState`] 経由で注入されるため、テストでは
//! インメモリ実装に差し替えられる。

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

use handlers::AppState;

/// ルータを構築して返す。
pub fn app(state: AppState) -> Router {
    let tasks = Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route("/:id", put(handlers::update_task).delete(handlers::delete_task));

    Router::new()
        .route("/ok", get(handlers::ok))
        .nest("/api/tasks", tasks)
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
