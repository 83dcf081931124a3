use serde::{Deserialize, Serialize};

/// タスク1件のレコード。`_id` はストア側で採番される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub task: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// 部分更新。省略されたフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_id_as_underscore_id() {
        let task = Task {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string(),
            task: "buy milk".to_string(),
            completed: false,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["_id"], "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(json["task"], "buy milk");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_task_defaults_completed_to_false() {
        let input: CreateTask = serde_json::from_str(r#"{"task":"buy milk"}"#).unwrap();
        assert_eq!(input.task, "buy milk");
        assert!(!input.completed);
    }

    #[test]
    fn update_task_accepts_any_subset_of_fields() {
        let only_completed: UpdateTask = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(only_completed.task, None);
        assert_eq!(only_completed.completed, Some(true));

        let empty: UpdateTask = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn update_task_omits_absent_fields_on_the_wire() {
        let patch = UpdateTask {
            task: None,
            completed: Some(true),
        };

        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }
}
