use dioxus::prelude::*;

use crate::controller::TasksController;

/// 新規タスクの入力フォーム。状態は持たず、操作はコントローラへ委譲する。
#[component]
pub fn TaskForm(controller: TasksController) -> Element {
    let mut draft = controller.draft;

    rsx! {
        form {
            class: "task-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                spawn(async move {
                    controller.submit().await;
                });
            },
            input {
                r#type: "text",
                class: "task-input",
                placeholder: "Add New TO-DO",
                required: true,
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
            }
            button { r#type: "submit", class: "add-task-btn", "Add Task" }
        }
    }
}
