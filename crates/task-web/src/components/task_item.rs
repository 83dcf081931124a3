use dioxus::prelude::*;
use task_model::Task;

use crate::controller::TasksController;

#[component]
pub fn TaskItem(controller: TasksController, task: Task) -> Element {
    let text_class = if task.completed {
        "task-text completed"
    } else {
        "task-text"
    };
    let toggle_id = task.id.clone();
    let delete_id = task.id.clone();

    rsx! {
        li { class: "task-item",
            input {
                r#type: "checkbox",
                checked: task.completed,
                onclick: move |_| {
                    let id = toggle_id.clone();
                    spawn(async move {
                        controller.toggle(id).await;
                    });
                },
            }
            div { class: "{text_class}", "{task.task}" }
            button {
                class: "delete-task-btn",
                onclick: move |_| {
                    let id = delete_id.clone();
                    spawn(async move {
                        controller.remove(id).await;
                    });
                },
                "Delete"
            }
        }
    }
}
