use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use task_model::{CreateTask, Task, UpdateTask};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// タスクコレクションへのハンドル。実装を差し替えられるようにトレイトで切る。
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new record; the store assigns the identifier.
    async fn create(&self, input: CreateTask) -> Result<Task, StoreError>;

    /// Every record in the collection, store-native order.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Applies the present fields and returns the post-update record,
    /// or `None` when no record matches the identifier.
    async fn update(&self, id: &str, patch: UpdateTask) -> Result<Option<Task>, StoreError>;

    /// Removes and returns the record, or `None` when nothing matched.
    async fn delete(&self, id: &str) -> Result<Option<Task>, StoreError>;
}

pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Builds the client from the environment configuration and probes the
    /// table once. A failed probe is logged and startup continues degraded;
    /// there is no retry and no reconnect.
    pub async fn connect(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(creds) = &config.credentials {
            loader = loader.credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                creds.username.clone(),
                creds.password.clone(),
                None,
                None,
                "db-auth",
            ));
        }
        let aws_config = loader.load().await;
        let client = Client::new(&aws_config);

        let store = Self {
            client,
            table_name: config.table_name.clone(),
        };

        match store
            .client
            .describe_table()
            .table_name(&store.table_name)
            .send()
            .await
        {
            Ok(_) => tracing::info!(table = %store.table_name, "Connected to database."),
            Err(e) => tracing::error!(error = ?e, "Could not connect to database."),
        }

        store
    }
}

#[async_trait]
impl TaskStore for DynamoStore {
    async fn create(&self, input: CreateTask) -> Result<Task, StoreError> {
        let task = Task {
            id: ulid::Ulid::new().to_string(),
            task: input.task,
            completed: input.completed,
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::S(task.id.clone()))
            .item("task", AttributeValue::S(task.task.clone()))
            .item("completed", AttributeValue::Bool(task.completed))
            .send()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let tasks = result.items().iter().filter_map(item_to_task).collect();

        Ok(tasks)
    }

    async fn update(&self, id: &str, patch: UpdateTask) -> Result<Option<Task>, StoreError> {
        // An empty patch changes nothing; degrade to a read.
        if patch.is_empty() {
            let result = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .key("id", AttributeValue::S(id.to_string()))
                .send()
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
            return Ok(result.item().and_then(item_to_task));
        }

        let mut update_parts = Vec::new();
        let mut builder = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            // Guard against DynamoDB upserting a fresh item for an unknown id.
            // `id` is a reserved word in expressions, hence the #id alias.
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .return_values(ReturnValue::AllNew);

        if let Some(text) = &patch.task {
            update_parts.push("#t = :task");
            builder = builder
                .expression_attribute_names("#t", "task")
                .expression_attribute_values(":task", AttributeValue::S(text.clone()));
        }

        if let Some(completed) = patch.completed {
            update_parts.push("#c = :completed");
            builder = builder
                .expression_attribute_names("#c", "completed")
                .expression_attribute_values(":completed", AttributeValue::Bool(completed));
        }

        let expression = format!("SET {}", update_parts.join(", "));
        builder = builder.update_expression(expression);

        match builder.send().await {
            Ok(result) => {
                let item = result.attributes().ok_or_else(|| {
                    StoreError::Serialization("updated item has no attributes".to_string())
                })?;
                let task = item_to_task(item).ok_or_else(|| {
                    StoreError::Serialization("failed to parse updated item".to_string())
                })?;
                Ok(Some(task))
            }
            Err(e) if is_conditional_check_failed(&e) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.attributes().and_then(item_to_task))
    }
}

fn is_conditional_check_failed(err: &SdkError<UpdateItemError>) -> bool {
    matches!(
        err.as_service_error(),
        Some(e) if e.is_conditional_check_failed_exception()
    )
}

fn item_to_task(item: &HashMap<String, AttributeValue>) -> Option<Task> {
    Some(Task {
        id: item.get("id")?.as_s().ok()?.clone(),
        task: item.get("task")?.as_s().ok()?.clone(),
        completed: *item.get("completed")?.as_bool().ok()?,
    })
}

/// インメモリ実装（開発・テスト用）。
#[derive(Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, input: CreateTask) -> Result<Task, StoreError> {
        let task = Task {
            id: ulid::Ulid::new().to_string(),
            task: input.task,
            completed: input.completed,
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn update(&self, id: &str, patch: UpdateTask) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(text) = patch.task {
            task.task = text;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let index = tasks.iter().position(|t| t.id == id);
        Ok(index.map(|i| tasks.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(text: &str) -> CreateTask {
        CreateTask {
            task: text.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_a_fresh_id() {
        let store = MemoryStore::default();

        let a = store.create(new_task("A")).await.unwrap();
        let b = store.create(new_task("B")).await.unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let store = MemoryStore::default();
        let created = store.create(new_task("A")).await.unwrap();

        let patch = UpdateTask {
            task: None,
            completed: Some(true),
        };
        let updated = store.update(&created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.task, "A");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemoryStore::default();

        let patch = UpdateTask {
            task: None,
            completed: Some(true),
        };
        let result = store.update("missing", patch).await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record_once() {
        let store = MemoryStore::default();
        let created = store.create(new_task("A")).await.unwrap();

        let first = store.delete(&created.id).await.unwrap();
        let second = store.delete(&created.id).await.unwrap();

        assert_eq!(first, Some(created));
        assert_eq!(second, None);
        assert!(store.list().await.unwrap().is_empty());
    }
}
