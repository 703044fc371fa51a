//! Store layer: the minimal create/read/update/delete contract the board
//! needs against a keyed JSON document store.
//!
//! [`RemoteStore`] talks HTTP; [`MemoryStore`] is an in-process
//! implementation of the same seam used by the integration tests.

pub mod memory;
pub mod remote;

pub use memory::{MemoryStore, StoreOp};
pub use remote::RemoteStore;

use std::future::Future;

use indexmap::IndexMap;

use crate::model::{Contact, Status, Task};

/// Error kinds surfaced by store operations.
///
/// No operation retries; callers decide policy. Cascade call sites log and
/// continue, interactive call sites surface a transient message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("request could not complete: {0}")]
    Network(String),
    #[error("record not found")]
    NotFound,
    #[error("store rejected the request (HTTP {status})")]
    Server { status: u16 },
}

/// Async store seam.
///
/// All operations may fail; none are transactional across records.
/// Multi-record fan-out lives above this trait (see `ops::sync`) and is
/// best-effort: partial failure leaves some records updated and others not.
pub trait Store: Send + Sync {
    /// Load the full task collection, keyed by id, in store order.
    fn load_tasks(
        &self,
    ) -> impl Future<Output = Result<IndexMap<String, Task>, StoreError>> + Send;

    /// Fetch a single task by id.
    fn fetch_task(&self, id: &str) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Create a task; the store assigns and returns the id.
    fn create_task(&self, task: &Task) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Replace a task's full record.
    fn update_task(
        &self,
        id: &str,
        task: &Task,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Patch only the `status` field of a task.
    fn patch_task_status(
        &self,
        id: &str,
        status: Status,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Patch only the `assignedTo` field of a task.
    fn patch_task_assignees(
        &self,
        id: &str,
        assigned_to: &[String],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a task record.
    fn delete_task(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Load the full contact collection, keyed by id, in store order.
    fn load_contacts(
        &self,
    ) -> impl Future<Output = Result<IndexMap<String, Contact>, StoreError>> + Send;

    /// Fetch a single contact by id.
    fn fetch_contact(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Contact, StoreError>> + Send;

    /// Create a contact; the store assigns and returns the id.
    fn create_contact(
        &self,
        contact: &Contact,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Replace a contact's full record.
    fn update_contact(
        &self,
        id: &str,
        contact: &Contact,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a contact record.
    fn delete_contact(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace a contact's denormalized task-id list.
    fn put_contact_tasks(
        &self,
        id: &str,
        tasks: &[String],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
