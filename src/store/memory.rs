use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::model::{Contact, Status, Subtask, Task};

use super::{Store, StoreError};

/// A write observed by a [`MemoryStore`].
///
/// Tests assert against this log to check persist counts and payloads
/// (e.g. that a subtask toggle persists the then-current full list).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    CreateTask(String),
    UpdateTask { id: String, subtasks: Vec<Subtask> },
    PatchStatus { id: String, status: Status },
    PatchAssignees { id: String, assigned_to: Vec<String> },
    DeleteTask(String),
    CreateContact(String),
    UpdateContact(String),
    DeleteContact(String),
    PutContactTasks { id: String, tasks: Vec<String> },
}

#[derive(Default)]
struct Inner {
    tasks: IndexMap<String, Task>,
    contacts: IndexMap<String, Contact>,
    next_task: u64,
    next_contact: u64,
    ops: Vec<StoreOp>,
    fail_read: Option<StoreError>,
    fail_write: Option<StoreError>,
}

/// In-process implementation of the [`Store`] seam.
///
/// Ids are assigned from monotonic counters and never reused. Reads and
/// writes go through a single lock; no await points are held across it.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed a task, returning its assigned id.
    pub fn seed_task(&self, mut task: Task) -> String {
        let mut inner = self.inner.lock();
        inner.next_task += 1;
        let id = format!("t{:04}", inner.next_task);
        task.id = id.clone();
        inner.tasks.insert(id.clone(), task);
        id
    }

    /// Seed a contact, returning its assigned id.
    pub fn seed_contact(&self, mut contact: Contact) -> String {
        let mut inner = self.inner.lock();
        inner.next_contact += 1;
        let id = format!("c{:04}", inner.next_contact);
        contact.id = id.clone();
        inner.contacts.insert(id.clone(), contact);
        id
    }

    /// Make the next read (load/fetch) fail with the given error.
    pub fn fail_next_read(&self, error: StoreError) {
        self.inner.lock().fail_read = Some(error);
    }

    /// Make the next write fail with the given error.
    pub fn fail_next_write(&self, error: StoreError) {
        self.inner.lock().fail_write = Some(error);
    }

    /// Snapshot of the operation log.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.lock().ops.clone()
    }

    /// Current task record, if present.
    pub fn task(&self, id: &str) -> Option<Task> {
        self.inner.lock().tasks.get(id).cloned()
    }

    /// Current contact record, if present.
    pub fn contact(&self, id: &str) -> Option<Contact> {
        self.inner.lock().contacts.get(id).cloned()
    }

    pub fn task_count(&self) -> usize {
        self.inner.lock().tasks.len()
    }
}

impl Inner {
    fn take_read_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_read.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn take_write_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_write.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Store for MemoryStore {
    async fn load_tasks(&self) -> Result<IndexMap<String, Task>, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_read_failure()?;
        Ok(inner.tasks.clone())
    }

    async fn fetch_task(&self, id: &str) -> Result<Task, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_read_failure()?;
        inner.tasks.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_task(&self, task: &Task) -> Result<String, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        inner.next_task += 1;
        let id = format!("t{:04}", inner.next_task);
        let mut task = task.clone();
        task.id = id.clone();
        inner.tasks.insert(id.clone(), task);
        inner.ops.push(StoreOp::CreateTask(id.clone()));
        Ok(id)
    }

    async fn update_task(&self, id: &str, task: &Task) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        if !inner.tasks.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        let mut task = task.clone();
        task.id = id.to_string();
        inner.ops.push(StoreOp::UpdateTask {
            id: id.to_string(),
            subtasks: task.subtasks.clone(),
        });
        inner.tasks.insert(id.to_string(), task);
        Ok(())
    }

    async fn patch_task_status(&self, id: &str, status: Status) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        let task = inner.tasks.get_mut(id).ok_or(StoreError::NotFound)?;
        task.status = status;
        inner.ops.push(StoreOp::PatchStatus {
            id: id.to_string(),
            status,
        });
        Ok(())
    }

    async fn patch_task_assignees(
        &self,
        id: &str,
        assigned_to: &[String],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        let task = inner.tasks.get_mut(id).ok_or(StoreError::NotFound)?;
        task.assigned_to = assigned_to.to_vec();
        inner.ops.push(StoreOp::PatchAssignees {
            id: id.to_string(),
            assigned_to: assigned_to.to_vec(),
        });
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        // shift_remove keeps store order for the surviving records
        inner.tasks.shift_remove(id).ok_or(StoreError::NotFound)?;
        inner.ops.push(StoreOp::DeleteTask(id.to_string()));
        Ok(())
    }

    async fn load_contacts(&self) -> Result<IndexMap<String, Contact>, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_read_failure()?;
        Ok(inner.contacts.clone())
    }

    async fn fetch_contact(&self, id: &str) -> Result<Contact, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_read_failure()?;
        inner.contacts.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_contact(&self, contact: &Contact) -> Result<String, StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        inner.next_contact += 1;
        let id = format!("c{:04}", inner.next_contact);
        let mut contact = contact.clone();
        contact.id = id.clone();
        inner.contacts.insert(id.clone(), contact);
        inner.ops.push(StoreOp::CreateContact(id.clone()));
        Ok(id)
    }

    async fn update_contact(&self, id: &str, contact: &Contact) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        if !inner.contacts.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        let mut contact = contact.clone();
        contact.id = id.to_string();
        inner.contacts.insert(id.to_string(), contact);
        inner.ops.push(StoreOp::UpdateContact(id.to_string()));
        Ok(())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        inner
            .contacts
            .shift_remove(id)
            .ok_or(StoreError::NotFound)?;
        inner.ops.push(StoreOp::DeleteContact(id.to_string()));
        Ok(())
    }

    async fn put_contact_tasks(&self, id: &str, tasks: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        inner.take_write_failure()?;
        let contact = inner.contacts.get_mut(id).ok_or(StoreError::NotFound)?;
        contact.tasks = tasks.to_vec();
        inner.ops.push(StoreOp::PutContactTasks {
            id: id.to_string(),
            tasks: tasks.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let store = MemoryStore::new();
        let a = store.create_task(&Task::new("a", Status::Todo)).await.unwrap();
        store.delete_task(&a).await.unwrap();
        let b = store.create_task(&Task::new("b", Status::Todo)).await.unwrap();
        // Ids are never reused after deletion.
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_fail_next_write_applies_once() {
        let store = MemoryStore::new();
        let id = store.seed_task(Task::new("a", Status::Todo));
        store.fail_next_write(StoreError::Server { status: 500 });
        assert_eq!(
            store.patch_task_status(&id, Status::Done).await,
            Err(StoreError::Server { status: 500 })
        );
        // The failure is consumed; the next call goes through.
        store.patch_task_status(&id, Status::Done).await.unwrap();
        assert_eq!(store.task(&id).unwrap().status, Status::Done);
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(store.fetch_task("nope").await, Err(StoreError::NotFound));
    }
}
