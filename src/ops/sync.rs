//! Maintenance of the denormalized back-references between tasks and
//! contacts: `contact ∈ task.assigned_to ⟺ task ∈ contact.tasks`.
//!
//! Every assignment change funnels through here. Fan-out across records is
//! issued in parallel and settles branch by branch: a failed branch is
//! logged and skipped, never rolled back, and never blocks the primary
//! operation. The invariant is eventual — a reload converges it.

use futures_util::future::join_all;
use tracing::warn;

use crate::store::{Store, StoreError};

/// Outcome of a best-effort fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub attempted: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn merge(self, other: SyncReport) -> SyncReport {
        SyncReport {
            attempted: self.attempted + other.attempted,
            failed: self.failed + other.failed,
        }
    }

    pub fn fully_applied(self) -> bool {
        self.failed == 0
    }
}

fn settle(branches: Vec<bool>) -> SyncReport {
    SyncReport {
        attempted: branches.len(),
        failed: branches.iter().filter(|ok| !**ok).count(),
    }
}

/// Add a task to each listed contact's `tasks` back-reference.
/// Used after task creation and when assignees are added on edit.
pub async fn assign_task_to_contacts<S: Store>(
    store: &S,
    task_id: &str,
    contact_ids: &[String],
) -> SyncReport {
    let branches = contact_ids.iter().map(|contact_id| async move {
        let result = async {
            let contact = store.fetch_contact(contact_id).await?;
            if !contact.tasks.iter().any(|t| t == task_id) {
                let mut tasks = contact.tasks;
                tasks.push(task_id.to_string());
                store.put_contact_tasks(contact_id, &tasks).await?;
            }
            Ok::<(), StoreError>(())
        }
        .await;
        if let Err(error) = &result {
            warn!(contact = %contact_id, task = %task_id, %error, "assign fan-out branch failed");
        }
        result.is_ok()
    });
    settle(join_all(branches).await)
}

/// Strip a task from each listed contact's `tasks` back-reference.
pub async fn unassign_task_from_contacts<S: Store>(
    store: &S,
    task_id: &str,
    contact_ids: &[String],
) -> SyncReport {
    let branches = contact_ids.iter().map(|contact_id| async move {
        let result = async {
            let contact = store.fetch_contact(contact_id).await?;
            if contact.tasks.iter().any(|t| t == task_id) {
                let remaining: Vec<String> = contact
                    .tasks
                    .into_iter()
                    .filter(|t| t != task_id)
                    .collect();
                store.put_contact_tasks(contact_id, &remaining).await?;
            }
            Ok::<(), StoreError>(())
        }
        .await;
        if let Err(error) = &result {
            warn!(contact = %contact_id, task = %task_id, %error, "unassign fan-out branch failed");
        }
        result.is_ok()
    });
    settle(join_all(branches).await)
}

/// Fan out both directions of an assignment edit: contacts newly on the
/// task gain the back-reference, contacts taken off it lose theirs.
/// The task record itself is the caller's primary write.
pub async fn apply_assignment_change<S: Store>(
    store: &S,
    task_id: &str,
    old: &[String],
    new: &[String],
) -> SyncReport {
    let added: Vec<String> = new.iter().filter(|c| !old.contains(c)).cloned().collect();
    let removed: Vec<String> = old.iter().filter(|c| !new.contains(c)).cloned().collect();
    let (a, b) = tokio::join!(
        assign_task_to_contacts(store, task_id, &added),
        unassign_task_from_contacts(store, task_id, &removed),
    );
    a.merge(b)
}

/// Delete a task: first strip its id from every contact holding it, then
/// delete the record. The strip is best-effort; the delete is the primary
/// operation and its failure is returned.
pub async fn cascade_task_delete<S: Store>(
    store: &S,
    task_id: &str,
) -> Result<SyncReport, StoreError> {
    let contacts = store.load_contacts().await?;
    let branches: Vec<_> = contacts
        .values()
        .filter(|contact| contact.tasks.iter().any(|t| t == task_id))
        .map(|contact| {
            let remaining: Vec<String> = contact
                .tasks
                .iter()
                .filter(|t| *t != task_id)
                .cloned()
                .collect();
            let contact_id = contact.id.clone();
            async move {
                let result = store.put_contact_tasks(&contact_id, &remaining).await;
                if let Err(error) = &result {
                    warn!(contact = %contact_id, task = %task_id, %error, "task delete cascade branch failed");
                }
                result.is_ok()
            }
        })
        .collect();
    let report = settle(join_all(branches).await);
    store.delete_task(task_id).await?;
    Ok(report)
}

/// Delete a contact: strip it from every task's `assigned_to`; a task
/// whose last assignee was this contact is deleted outright. The record
/// delete is the primary operation and runs after the fan-out settles.
pub async fn cascade_contact_delete<S: Store>(
    store: &S,
    contact_id: &str,
) -> Result<SyncReport, StoreError> {
    let tasks = store.load_tasks().await?;
    let branches: Vec<_> = tasks
        .values()
        .filter(|task| task.assigned_to.iter().any(|c| c == contact_id))
        .map(|task| {
            let remaining: Vec<String> = task
                .assigned_to
                .iter()
                .filter(|c| *c != contact_id)
                .cloned()
                .collect();
            let task_id = task.id.clone();
            async move {
                let result = if remaining.is_empty() {
                    store.delete_task(&task_id).await
                } else {
                    store.patch_task_assignees(&task_id, &remaining).await
                };
                if let Err(error) = &result {
                    warn!(contact = %contact_id, task = %task_id, %error, "contact delete cascade branch failed");
                }
                result.is_ok()
            }
        })
        .collect();
    let report = settle(join_all(branches).await);
    store.delete_contact(contact_id).await?;
    Ok(report)
}
