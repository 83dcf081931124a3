use dioxus::prelude::*;

use crate::components::TaskItem;
use crate::controller::TasksController;

#[component]
pub fn TaskList(controller: TasksController) -> Element {
    let tasks = controller.tasks;

    rsx! {
        ul { class: "tasks-list",
            for task in tasks() {
                TaskItem { key: "{task.id}", controller, task }
            }
        }
    }
}
