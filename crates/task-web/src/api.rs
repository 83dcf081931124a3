//! バックエンドの 4 ルートを包む薄い HTTP ラッパー。
//! リトライもタイムアウトもレスポンス変換も行わない。

use task_model::{CreateTask, Task, UpdateTask};

// ビルド時に BACKEND_URL で差し替え可能
const API_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:3500/api/tasks",
};

pub async fn fetch_tasks() -> reqwest::Result<Vec<Task>> {
    reqwest::get(API_URL)
        .await?
        .error_for_status()?
        .json()
        .await
}

pub async fn create_task(input: &CreateTask) -> reqwest::Result<Task> {
    reqwest::Client::new()
        .post(API_URL)
        .json(input)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

pub async fn update_task(id: &str, patch: &UpdateTask) -> reqwest::Result<reqwest::Response> {
    reqwest::Client::new()
        .put(format!("{API_URL}/{id}"))
        .json(patch)
        .send()
        .await?
        .error_for_status()
}

pub async fn delete_task(id: &str) -> reqwest::Result<reqwest::Response> {
    reqwest::Client::new()
        .delete(format!("{API_URL}/{id}"))
        .send()
        .await?
        .error_for_status()
}
