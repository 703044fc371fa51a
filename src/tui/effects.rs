//! Execution of queued persistence effects.
//!
//! Input handlers mutate the caches optimistically and queue an [`Effect`];
//! the event loop applies them here. Failures surface as a transient
//! status message and are logged — the optimistic value stays in the cache
//! until the next reload (accepted staleness window, no rollback).

use tracing::{error, info};

use crate::ops::sync;
use crate::store::Store;

use super::app::{App, Effect};

pub async fn apply<S: Store>(app: &mut App, store: &S, effect: Effect) {
    match effect {
        Effect::PersistStatus { task_id, status } => {
            if let Err(err) = store.patch_task_status(&task_id, status).await {
                error!(task = %task_id, %err, "status persist failed");
                app.say(format!("Could not save status change: {err}"));
            }
        }
        Effect::PersistTask { task_id } => {
            // Snapshot at apply time, so the record reflects the cache as
            // of this persist, not as of when the effect was queued.
            let Some(task) = app.tasks.get(&task_id).cloned() else {
                return;
            };
            if let Err(err) = store.update_task(&task_id, &task).await {
                error!(task = %task_id, %err, "task persist failed");
                app.say(format!("Could not save task: {err}"));
            }
        }
        Effect::DeleteTask { task_id } => {
            match sync::cascade_task_delete(store, &task_id).await {
                Ok(report) => {
                    info!(task = %task_id, ?report, "task deleted");
                    app.say(if report.fully_applied() {
                        "Task deleted".to_string()
                    } else {
                        "Task deleted; some contact updates failed".to_string()
                    });
                }
                Err(err) => {
                    error!(task = %task_id, %err, "task delete failed");
                    app.say(format!("Could not delete task: {err}"));
                }
            }
            reload(app, store).await;
        }
        Effect::DeleteContact { contact_id } => {
            match sync::cascade_contact_delete(store, &contact_id).await {
                Ok(report) => {
                    info!(contact = %contact_id, ?report, "contact deleted");
                    app.say(if report.fully_applied() {
                        "Contact deleted".to_string()
                    } else {
                        "Contact deleted; some task updates failed".to_string()
                    });
                }
                Err(err) => {
                    error!(contact = %contact_id, %err, "contact delete failed");
                    app.say(format!("Could not delete contact: {err}"));
                }
            }
            reload(app, store).await;
        }
        Effect::ReloadAll => {
            reload(app, store).await;
        }
    }
}

async fn reload<S: Store>(app: &mut App, store: &S) {
    if let Err(err) = app.tasks.reload(store).await {
        error!(%err, "task reload failed");
        app.say(format!("Could not reload tasks: {err}"));
    }
    if let Err(err) = app.contacts.reload(store).await {
        error!(%err, "contact reload failed");
        app.say(format!("Could not reload contacts: {err}"));
    }
    app.clamp_board_cursor();
    let contact_count = app.contacts.len();
    app.contacts_cursor = app.contacts_cursor.min(contact_count.saturating_sub(1));
}
