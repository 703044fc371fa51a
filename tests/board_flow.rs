//! Board flows driven end to end against the in-process store: drag-drop
//! settling, quick-move persistence, and subtask toggling.

use pretty_assertions::assert_eq;
use ratatui::layout::Rect;

use kanri::cache::TaskCache;
use kanri::model::{Status, Task};
use kanri::ops::board;
use kanri::store::{MemoryStore, Store, StoreError, StoreOp};
use kanri::tui::drag::{BoardHits, CardHit, DragState, LaneHit, Settle};

fn task(title: &str, status: Status) -> Task {
    Task::new(title, status)
}

/// Build one lane's hit rects with cards of height 4 at the given center
/// rows, mirroring what the board renderer records.
fn lane_hits(status: Status, x: u16, cards: &[(&str, i32)]) -> LaneHit {
    LaneHit {
        status,
        area: Rect::new(x, 0, 20, 400),
        cards: cards
            .iter()
            .map(|(id, center)| CardHit {
                task_id: (*id).to_string(),
                area: Rect::new(x, (*center - 2) as u16, 20, 4),
            })
            .collect(),
    }
}

/// Apply a settled drop the way the mouse handler does: optimistic cache
/// reorder + status set, then persist only the status field.
async fn apply_drop(
    cache: &mut TaskCache,
    store: &MemoryStore,
    hits: &BoardHits,
    settle: Settle,
) -> Result<(), StoreError> {
    let Settle::Drop {
        task_id,
        status,
        insert_index,
    } = settle
    else {
        panic!("expected a drop, got {settle:?}");
    };
    let before = hits
        .lane(status)
        .and_then(|lane| lane.card_id_at(&task_id, insert_index))
        .map(str::to_string);
    cache.reposition_before(&task_id, status, before.as_deref());
    store.patch_task_status(&task_id, status).await
}

fn lane_ids(cache: &TaskCache, status: Status) -> Vec<String> {
    cache
        .tasks()
        .iter()
        .filter(|t| t.status == status)
        .map(|t| t.id.clone())
        .collect()
}

#[tokio::test]
async fn test_drop_commits_status_to_store() {
    let store = MemoryStore::new();
    let dragged = store.seed_task(task("drag me", Status::Todo));
    let other = store.seed_task(task("stay", Status::Progress));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    let hits = BoardHits {
        lanes: vec![
            lane_hits(Status::Todo, 0, &[(dragged.as_str(), 10)]),
            lane_hits(Status::Progress, 20, &[(other.as_str(), 10)]),
        ],
    };

    let mut drag = DragState::default();
    assert!(drag.begin(dragged.clone(), 4));
    drag.update(&hits, 25, 30);
    let settle = drag.settle(&hits, 25, 30).unwrap();
    apply_drop(&mut cache, &store, &hits, settle).await.unwrap();

    // Status landed in the store and in the cache, wherever among the
    // siblings the card was dropped.
    assert_eq!(store.task(&dragged).unwrap().status, Status::Progress);
    assert_eq!(cache.get(&dragged).unwrap().status, Status::Progress);
}

#[tokio::test]
async fn test_drop_places_card_between_siblings() {
    let store = MemoryStore::new();
    let b1 = store.seed_task(task("b1", Status::Progress));
    let b2 = store.seed_task(task("b2", Status::Progress));
    let b3 = store.seed_task(task("b3", Status::Progress));
    let dragged = store.seed_task(task("dragged", Status::Todo));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    // Siblings at vertical centers 100/200/300; the drop lands at 250.
    let hits = BoardHits {
        lanes: vec![
            lane_hits(Status::Todo, 0, &[(dragged.as_str(), 10)]),
            lane_hits(
                Status::Progress,
                20,
                &[(b1.as_str(), 100), (b2.as_str(), 200), (b3.as_str(), 300)],
            ),
        ],
    };

    let mut drag = DragState::default();
    drag.begin(dragged.clone(), 4);
    drag.update(&hits, 25, 250);
    let settle = drag.settle(&hits, 25, 250).unwrap();
    apply_drop(&mut cache, &store, &hits, settle).await.unwrap();

    assert_eq!(
        lane_ids(&cache, Status::Progress),
        vec![b1, b2, dragged, b3]
    );
}

#[tokio::test]
async fn test_drop_on_empty_lane_equals_drop_into_lane() {
    let store = MemoryStore::new();
    let dragged = store.seed_task(task("drag me", Status::Todo));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    // The Feedback lane is empty; its whole body is the drop surface.
    let hits = BoardHits {
        lanes: vec![
            lane_hits(Status::Todo, 0, &[(dragged.as_str(), 10)]),
            lane_hits(Status::Feedback, 20, &[]),
        ],
    };

    let mut drag = DragState::default();
    drag.begin(dragged.clone(), 4);
    drag.update(&hits, 30, 200);
    let settle = drag.settle(&hits, 30, 200).unwrap();
    apply_drop(&mut cache, &store, &hits, settle).await.unwrap();

    assert_eq!(store.task(&dragged).unwrap().status, Status::Feedback);
    assert_eq!(lane_ids(&cache, Status::Feedback), vec![dragged]);
}

#[tokio::test]
async fn test_cancelled_drag_persists_nothing() {
    let store = MemoryStore::new();
    let dragged = store.seed_task(task("drag me", Status::Todo));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    let hits = BoardHits {
        lanes: vec![lane_hits(Status::Todo, 0, &[(dragged.as_str(), 10)])],
    };

    let mut drag = DragState::default();
    drag.begin(dragged.clone(), 4);
    drag.update(&hits, 100, 100);
    assert_eq!(drag.settle(&hits, 100, 100), Some(Settle::Cancelled));

    // No request was issued during the gesture; nothing to undo.
    assert!(store.ops().is_empty());
    assert_eq!(cache.get(&dragged).unwrap().status, Status::Todo);
}

#[tokio::test]
async fn test_failed_persist_leaves_optimistic_value_until_reload() {
    let store = MemoryStore::new();
    let id = store.seed_task(task("flaky", Status::Todo));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    cache.set_status(&id, Status::Done);
    store.fail_next_write(StoreError::Network("connection reset".into()));
    assert!(store.patch_task_status(&id, Status::Done).await.is_err());

    // The cache stays ahead of the store — the accepted staleness window.
    assert_eq!(cache.get(&id).unwrap().status, Status::Done);
    assert_eq!(store.task(&id).unwrap().status, Status::Todo);

    // Reload converges back to what the store holds.
    cache.reload(&store).await.unwrap();
    assert_eq!(cache.get(&id).unwrap().status, Status::Todo);
}

#[tokio::test]
async fn test_uncoordinated_writes_last_one_wins() {
    let store = MemoryStore::new();
    let id = store.seed_task(task("contended", Status::Todo));

    // A drop persist and a quick-move persist for the same task are not
    // coordinated; whichever completes last determines the stored value.
    store.patch_task_status(&id, Status::Progress).await.unwrap();
    store.patch_task_status(&id, Status::Feedback).await.unwrap();
    assert_eq!(store.task(&id).unwrap().status, Status::Feedback);
}

#[tokio::test]
async fn test_subtask_toggle_twice_issues_two_full_persists() {
    let store = MemoryStore::new();
    let mut seeded = task("with subtasks", Status::Todo);
    seeded.add_subtask("first");
    seeded.add_subtask("second");
    let id = store.seed_task(seeded);

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();
    let original = cache.get(&id).unwrap().subtasks.clone();

    // Toggle on, persist the whole record; toggle off, persist again.
    for _ in 0..2 {
        cache.toggle_subtask(&id, 1).unwrap();
        let snapshot = cache.get(&id).unwrap().clone();
        store.update_task(&id, &snapshot).await.unwrap();
    }

    let updates: Vec<_> = store
        .ops()
        .into_iter()
        .filter_map(|op| match op {
            StoreOp::UpdateTask { subtasks, .. } => Some(subtasks),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 2);
    // Each persist carried the then-current full subtask list.
    assert!(updates[0][0].done);
    assert!(!updates[1][0].done);
    assert_eq!(updates[0].len(), 2);
    assert_eq!(updates[1].len(), 2);

    // Back to the original value, in cache and store.
    assert_eq!(cache.get(&id).unwrap().subtasks, original);
    assert_eq!(store.task(&id).unwrap().subtasks, original);
}

#[tokio::test]
async fn test_quick_move_uses_same_persist_path() {
    let store = MemoryStore::new();
    let id = store.seed_task(task("movable", Status::Feedback));

    let mut cache = TaskCache::new();
    cache.reload(&store).await.unwrap();

    // A middle lane offers both neighbors; pick "forward".
    let options = board::quick_moves(Status::Feedback);
    assert_eq!(options, vec![Status::Progress, Status::Done]);
    let target = options[1];

    cache.set_status(&id, target);
    store.patch_task_status(&id, target).await.unwrap();

    assert_eq!(store.task(&id).unwrap().status, Status::Done);
    assert_eq!(
        store.ops(),
        vec![StoreOp::PatchStatus {
            id: id.clone(),
            status: Status::Done
        }]
    );
}
