use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::{Contact, Status, Task};

use super::{Store, StoreError};

/// Contacts are stored wrapped in a `user` sub-record.
#[derive(Debug, Serialize, Deserialize)]
struct UserEnvelope {
    user: Contact,
}

/// Response body of a create (`POST …/<collection>.json`).
#[derive(Debug, Deserialize)]
struct CreatedKey {
    name: String,
}

/// HTTP client for the remote JSON document store.
///
/// Paths follow the store's `.json` convention: `GET /tasks.json` returns
/// the id→record map, `PATCH /tasks/{id}.json` updates fields in place,
/// `PUT /users/{id}/user/tasks.json` replaces the denormalized task list.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// Build a client against the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(RemoteStore { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}.json", self.base_url)
    }

    /// Check the response status and decode the body as `T`.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))
    }

    /// GET a path, treating a JSON `null` body as [`StoreError::NotFound`].
    async fn get_required<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(request_error)?;
        let value: Option<T> = Self::decode(response).await?;
        value.ok_or(StoreError::NotFound)
    }

    async fn patch<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(request_error)?;
        check_status(response).map(|_| ())
    }
}

fn request_error(e: reqwest::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        Err(StoreError::NotFound)
    } else {
        Err(StoreError::Server {
            status: status.as_u16(),
        })
    }
}

impl Store for RemoteStore {
    async fn load_tasks(&self) -> Result<IndexMap<String, Task>, StoreError> {
        let response = self
            .client
            .get(self.url("tasks"))
            .send()
            .await
            .map_err(request_error)?;
        // An empty collection comes back as a JSON null.
        let records: Option<IndexMap<String, Task>> = Self::decode(response).await?;
        let mut tasks = records.unwrap_or_default();
        for (id, task) in tasks.iter_mut() {
            task.id = id.clone();
        }
        Ok(tasks)
    }

    async fn fetch_task(&self, id: &str) -> Result<Task, StoreError> {
        let mut task: Task = self.get_required(&format!("tasks/{id}")).await?;
        task.id = id.to_string();
        Ok(task)
    }

    async fn create_task(&self, task: &Task) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.url("tasks"))
            .json(task)
            .send()
            .await
            .map_err(request_error)?;
        let created: CreatedKey = Self::decode(response).await?;
        Ok(created.name)
    }

    async fn update_task(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        self.patch(&format!("tasks/{id}"), task).await
    }

    async fn patch_task_status(&self, id: &str, status: Status) -> Result<(), StoreError> {
        self.patch(&format!("tasks/{id}"), &json!({ "status": status }))
            .await
    }

    async fn patch_task_assignees(
        &self,
        id: &str,
        assigned_to: &[String],
    ) -> Result<(), StoreError> {
        self.patch(&format!("tasks/{id}"), &json!({ "assignedTo": assigned_to }))
            .await
    }

    async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.url(&format!("tasks/{id}")))
            .send()
            .await
            .map_err(request_error)?;
        check_status(response).map(|_| ())
    }

    async fn load_contacts(&self) -> Result<IndexMap<String, Contact>, StoreError> {
        let response = self
            .client
            .get(self.url("users"))
            .send()
            .await
            .map_err(request_error)?;
        let records: Option<IndexMap<String, UserEnvelope>> = Self::decode(response).await?;
        let contacts = records
            .unwrap_or_default()
            .into_iter()
            .map(|(id, envelope)| {
                let mut contact = envelope.user;
                contact.id = id.clone();
                (id, contact)
            })
            .collect();
        Ok(contacts)
    }

    async fn fetch_contact(&self, id: &str) -> Result<Contact, StoreError> {
        let envelope: UserEnvelope = self.get_required(&format!("users/{id}")).await?;
        let mut contact = envelope.user;
        contact.id = id.to_string();
        Ok(contact)
    }

    async fn create_contact(&self, contact: &Contact) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.url("users"))
            .json(&json!({ "user": contact }))
            .send()
            .await
            .map_err(request_error)?;
        let created: CreatedKey = Self::decode(response).await?;
        Ok(created.name)
    }

    async fn update_contact(&self, id: &str, contact: &Contact) -> Result<(), StoreError> {
        self.patch(&format!("users/{id}"), &json!({ "user": contact }))
            .await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.url(&format!("users/{id}")))
            .send()
            .await
            .map_err(request_error)?;
        check_status(response).map(|_| ())
    }

    async fn put_contact_tasks(&self, id: &str, tasks: &[String]) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url(&format!("users/{id}/user/tasks")))
            .json(&tasks)
            .send()
            .await
            .map_err(request_error)?;
        check_status(response).map(|_| ())
    }
}
