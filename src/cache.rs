//! In-memory caches for the two collections.
//!
//! The caches are the source of truth for rendering until the next
//! `reload()`. All mutation goes through these methods; nothing else holds
//! the task list. Optimistic mutations (status changes, subtask toggles)
//! land here immediately, independent of whether the persist that follows
//! succeeds — a failed persist leaves the cache ahead of the store until
//! the next reload.

use crate::model::{Contact, Status, Task};
use crate::store::{Store, StoreError};

/// The last successfully loaded task list, in store order.
#[derive(Debug, Default)]
pub struct TaskCache {
    tasks: Vec<Task>,
}

impl TaskCache {
    pub fn new() -> Self {
        TaskCache::default()
    }

    /// Fetch the full collection and replace the cache wholesale.
    pub async fn reload<S: Store>(&mut self, store: &S) -> Result<(), StoreError> {
        self.tasks = store.load_tasks().await?.into_values().collect();
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Optimistically set a task's status. Returns false if the id is gone.
    pub fn set_status(&mut self, id: &str, status: Status) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    /// Settle a drop: set the task's status to the target lane's and place
    /// it before `before` (a sibling in that lane), or at the end when
    /// `before` is `None`. The resulting order is presentation-only and
    /// resets to store order on the next reload.
    pub fn reposition_before(&mut self, id: &str, status: Status, before: Option<&str>) -> bool {
        let Some(current) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let mut task = self.tasks.remove(current);
        task.status = status;
        let insert_at = before
            .and_then(|bid| self.tasks.iter().position(|t| t.id == bid))
            .unwrap_or(self.tasks.len());
        self.tasks.insert(insert_at, task);
        true
    }

    /// Flip one subtask's done flag. Returns the new value.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: u32) -> Option<bool> {
        let task = self.get_mut(task_id)?;
        let subtask = task.subtasks.iter_mut().find(|s| s.id == subtask_id)?;
        subtask.done = !subtask.done;
        Some(subtask.done)
    }

    /// Drop a task from the cache (after a confirmed delete).
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }
}

/// The last successfully loaded contact list, in store order.
#[derive(Debug, Default)]
pub struct ContactCache {
    contacts: Vec<Contact>,
}

impl ContactCache {
    pub fn new() -> Self {
        ContactCache::default()
    }

    /// Fetch the full collection and replace the cache wholesale.
    pub async fn reload<S: Store>(&mut self, store: &S) -> Result<(), StoreError> {
        self.contacts = store.load_contacts().await?.into_values().collect();
        Ok(())
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Contacts sorted by display name, for the contacts view.
    pub fn sorted_by_name(&self) -> Vec<&Contact> {
        let mut sorted: Vec<&Contact> = self.contacts.iter().collect();
        sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        sorted
    }

    pub fn remove(&mut self, id: &str) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn task(id: &str, status: Status) -> Task {
        let mut t = Task::new(id, status);
        t.id = id.to_string();
        t
    }

    fn cache_with(tasks: Vec<Task>) -> TaskCache {
        let mut cache = TaskCache::new();
        cache.tasks = tasks;
        cache
    }

    fn lane_ids(cache: &TaskCache, status: Status) -> Vec<&str> {
        cache
            .tasks()
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_reload_replaces_wholesale() {
        let store = MemoryStore::new();
        store.seed_task(Task::new("one", Status::Todo));

        let mut cache = cache_with(vec![task("stale", Status::Done)]);
        cache.reload(&store).await.unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.tasks()[0].title, "one");
        assert!(cache.get("stale").is_none());
    }

    #[test]
    fn test_set_status_is_local_only() {
        let mut cache = cache_with(vec![task("a", Status::Todo)]);
        assert!(cache.set_status("a", Status::Feedback));
        assert_eq!(cache.get("a").unwrap().status, Status::Feedback);
        assert!(!cache.set_status("missing", Status::Done));
    }

    #[test]
    fn test_reposition_within_lane() {
        let mut cache = cache_with(vec![
            task("a", Status::Todo),
            task("b", Status::Todo),
            task("c", Status::Todo),
        ]);
        cache.reposition_before("c", Status::Todo, Some("a"));
        assert_eq!(lane_ids(&cache, Status::Todo), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reposition_across_lanes() {
        let mut cache = cache_with(vec![
            task("a", Status::Todo),
            task("b", Status::Progress),
            task("c", Status::Progress),
        ]);
        cache.reposition_before("a", Status::Progress, Some("c"));
        assert_eq!(cache.get("a").unwrap().status, Status::Progress);
        assert_eq!(lane_ids(&cache, Status::Progress), vec!["b", "a", "c"]);
        assert!(lane_ids(&cache, Status::Todo).is_empty());
    }

    #[test]
    fn test_reposition_no_anchor_appends() {
        let mut cache = cache_with(vec![task("a", Status::Todo), task("b", Status::Done)]);
        cache.reposition_before("a", Status::Done, None);
        assert_eq!(lane_ids(&cache, Status::Done), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_subtask_twice_restores() {
        let mut t = task("a", Status::Todo);
        t.add_subtask("check");
        let mut cache = cache_with(vec![t]);
        assert_eq!(cache.toggle_subtask("a", 1), Some(true));
        assert_eq!(cache.toggle_subtask("a", 1), Some(false));
        assert_eq!(cache.toggle_subtask("a", 99), None);
    }
}
