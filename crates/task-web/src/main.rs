mod api;
mod components;
mod controller;

use dioxus::prelude::*;

use components::{TaskForm, TaskList};

const CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let controller = controller::use_tasks();

    rsx! {
        document::Link { rel: "stylesheet", href: CSS }
        div { class: "app",
            header { class: "app-header",
                h1 { "My To-Do List" }
            }
            main { class: "main-content",
                div { class: "todo-container",
                    TaskForm { controller }
                    TaskList { controller }
                }
            }
        }
    }
}
