use std::collections::HashSet;

use dioxus::prelude::*;
use task_model::{CreateTask, Task, UpdateTask};

use crate::api;

/// 状態を持つコントローラ。表示側コンポーネントへは値で渡す。
///
/// toggle/remove は楽観的にローカルを書き換えてからリモートを呼び、
/// 失敗したらスナップショットへ戻す。同じタスクへのリクエストが
/// 処理中の間、そのタスクへの追加操作は無視される。
#[derive(Clone, Copy, PartialEq)]
pub struct TasksController {
    pub tasks: Signal<Vec<Task>>,
    pub draft: Signal<String>,
    in_flight: Signal<HashSet<String>>,
}

/// コントローラを生成し、マウント時に一覧を読み込む。
pub fn use_tasks() -> TasksController {
    let controller = TasksController {
        tasks: use_signal(Vec::new),
        draft: use_signal(String::new),
        in_flight: use_signal(HashSet::new),
    };

    use_effect(move || {
        spawn(async move {
            controller.load().await;
        });
    });

    controller
}

impl TasksController {
    pub async fn load(mut self) {
        match api::fetch_tasks().await {
            Ok(tasks) => self.tasks.set(tasks),
            // 失敗してもユーザーには出さず、空のまま
            Err(e) => tracing::error!("failed to load tasks: {e}"),
        }
    }

    pub async fn submit(mut self) {
        let text = self.draft.peek().clone();
        if text.trim().is_empty() {
            return;
        }

        let input = CreateTask {
            task: text,
            completed: false,
        };
        match api::create_task(&input).await {
            Ok(task) => {
                self.tasks.write().push(task);
                self.draft.set(String::new());
            }
            // 入力は保持したままにする
            Err(e) => tracing::error!("failed to add task: {e}"),
        }
    }

    pub async fn toggle(mut self, id: String) {
        if !self.begin(&id) {
            return;
        }

        let snapshot = self.tasks.peek().clone();
        let Some(completed) = toggle_completed(&mut self.tasks.write(), &id) else {
            self.finish(&id);
            return;
        };

        let patch = UpdateTask {
            task: None,
            completed: Some(completed),
        };
        if let Err(e) = api::update_task(&id, &patch).await {
            tracing::error!("failed to update task: {e}");
            self.tasks.set(snapshot);
        }

        self.finish(&id);
    }

    pub async fn remove(mut self, id: String) {
        if !self.begin(&id) {
            return;
        }

        let snapshot = self.tasks.peek().clone();
        if remove_by_id(&mut self.tasks.write(), &id).is_none() {
            self.finish(&id);
            return;
        }

        if let Err(e) = api::delete_task(&id).await {
            tracing::error!("failed to delete task: {e}");
            self.tasks.set(snapshot);
        }

        self.finish(&id);
    }

    /// 同一タスクへの連打を無視する。false なら既に処理中。
    fn begin(&mut self, id: &str) -> bool {
        self.in_flight.write().insert(id.to_string())
    }

    fn finish(&mut self, id: &str) {
        self.in_flight.write().remove(id);
    }
}

fn toggle_completed(tasks: &mut Vec<Task>, id: &str) -> Option<bool> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;
    task.completed = !task.completed;
    Some(task.completed)
}

fn remove_by_id(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    let index = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(index))
}
