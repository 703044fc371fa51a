//! The drag-and-drop engine.
//!
//! An explicit state machine: `Idle → Dragging → (drop | cancel) → Idle`.
//! The engine never touches the cache or the store itself — it resolves a
//! pointer gesture into a [`Settle`] outcome and the input layer applies
//! it (optimistic cache mutation + queued persist). Rendering reads the
//! state to draw the placeholder; it is a pure function of state + cache.
//!
//! Hit testing works on the rectangles the board renderer recorded during
//! the previous draw: a card's "vertical center" is the middle row of its
//! rectangle, and the insertion point follows the closest-negative-offset
//! rule — among the hovered lane's non-dragged cards, the one whose center
//! is below the pointer by the smallest margin marks the slot; if there is
//! none, the card goes to the end of the lane.

use ratatui::layout::Rect;

use crate::model::Status;

/// Hit-test rectangle of one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    pub task_id: String,
    pub area: Rect,
}

impl CardHit {
    pub fn center_row(&self) -> i32 {
        i32::from(self.area.y) + i32::from(self.area.height) / 2
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(ratatui::layout::Position { x: column, y: row })
    }
}

/// Hit-test snapshot of one lane's drop surface. The surface covers the
/// whole lane body, so the empty-lane placeholder drops like the lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneHit {
    pub status: Status,
    pub area: Rect,
    pub cards: Vec<CardHit>,
}

/// All lane surfaces recorded by the last board draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardHits {
    pub lanes: Vec<LaneHit>,
}

impl LaneHit {
    /// The non-dragged card currently occupying the given insertion slot,
    /// i.e. the card the dragged one would land in front of.
    pub fn card_id_at(&self, dragged_id: &str, insert_index: usize) -> Option<&str> {
        self.cards
            .iter()
            .filter(|card| card.task_id != dragged_id)
            .nth(insert_index)
            .map(|card| card.task_id.as_str())
    }
}

impl BoardHits {
    pub fn lane_at(&self, column: u16, row: u16) -> Option<&LaneHit> {
        let position = ratatui::layout::Position { x: column, y: row };
        self.lanes.iter().find(|lane| lane.area.contains(position))
    }

    pub fn lane(&self, status: Status) -> Option<&LaneHit> {
        self.lanes.iter().find(|lane| lane.status == status)
    }

    pub fn card_at(&self, column: u16, row: u16) -> Option<&CardHit> {
        self.lanes
            .iter()
            .flat_map(|lane| &lane.cards)
            .find(|card| card.contains(column, row))
    }
}

/// Where the placeholder currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub status: Status,
    pub insert_index: usize,
}

/// The gesture state. Exactly one card can be dragged at a time; a second
/// grab while one is active is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: String,
        /// Rows the placeholder reserves — the grabbed card's footprint.
        grab_height: u16,
        /// Whether the pointer moved since the grab; release without
        /// movement is a plain click.
        moved: bool,
        hover: Option<Hover>,
    },
}

/// How a released (or aborted) gesture settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settle {
    /// Released without movement: treat as a click on the card.
    Click { task_id: String },
    /// Released over a lane surface: commit status + position.
    Drop {
        task_id: String,
        status: Status,
        insert_index: usize,
    },
    /// Released outside every lane, or aborted: local state reset only,
    /// nothing was persisted (the engine persists only on drop).
    Cancelled,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<Hover> {
        match self {
            DragState::Dragging { hover, .. } => *hover,
            DragState::Idle => None,
        }
    }

    pub fn grab_height(&self) -> u16 {
        match self {
            DragState::Dragging { grab_height, .. } => *grab_height,
            DragState::Idle => 0,
        }
    }

    /// Grab a card. Returns false (and changes nothing) if a drag is
    /// already in progress.
    pub fn begin(&mut self, task_id: impl Into<String>, grab_height: u16) -> bool {
        if self.is_active() {
            return false;
        }
        *self = DragState::Dragging {
            task_id: task_id.into(),
            grab_height,
            moved: false,
            hover: None,
        };
        true
    }

    /// Track pointer movement: recompute the placeholder slot under the
    /// pointer. Off-lane positions clear the hover.
    pub fn update(&mut self, hits: &BoardHits, column: u16, row: u16) {
        let DragState::Dragging {
            task_id,
            moved,
            hover,
            ..
        } = self
        else {
            return;
        };
        *moved = true;
        *hover = hits.lane_at(column, row).map(|lane| Hover {
            status: lane.status,
            insert_index: insertion_index(lane, task_id, row),
        });
    }

    /// Release the pointer: resolve the gesture and return to idle.
    pub fn settle(&mut self, hits: &BoardHits, column: u16, row: u16) -> Option<Settle> {
        let state = std::mem::take(self);
        let DragState::Dragging {
            task_id,
            moved,
            hover,
            ..
        } = state
        else {
            return None;
        };
        if !moved {
            return Some(Settle::Click { task_id });
        }
        // Prefer the surface under the release point; fall back to the
        // last hover so a release on a lane border still drops.
        let target = hits
            .lane_at(column, row)
            .map(|lane| Hover {
                status: lane.status,
                insert_index: insertion_index(lane, &task_id, row),
            })
            .or(hover);
        Some(match target {
            Some(hover) => Settle::Drop {
                task_id,
                status: hover.status,
                insert_index: hover.insert_index,
            },
            None => Settle::Cancelled,
        })
    }

    /// Abort the gesture (e.g. Esc mid-drag).
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        *self = DragState::Idle;
        was_active
    }
}

/// Closest-negative-offset rule over the lane's non-dragged cards.
fn insertion_index(lane: &LaneHit, dragged_id: &str, pointer_row: u16) -> usize {
    let pointer = i32::from(pointer_row);
    let mut best: Option<(i32, usize)> = None;
    let mut position = 0;
    for card in &lane.cards {
        if card.task_id == dragged_id {
            continue;
        }
        let offset = pointer - card.center_row();
        if offset < 0 && best.is_none_or(|(b, _)| offset > b) {
            best = Some((offset, position));
        }
        position += 1;
    }
    // No card centered below the pointer → end of lane.
    best.map_or(position, |(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A lane whose cards have the given center rows (height 4 → center
    /// is y + 2).
    fn lane(status: Status, centers: &[i32]) -> LaneHit {
        let cards = centers
            .iter()
            .enumerate()
            .map(|(i, center)| CardHit {
                task_id: format!("t{i}"),
                area: Rect::new(0, (*center - 2) as u16, 20, 4),
            })
            .collect();
        LaneHit {
            status,
            area: Rect::new(0, 0, 20, 400),
            cards,
        }
    }

    #[test]
    fn test_insertion_between_cards() {
        // Centers 100/200/300, pointer at 250: only the card at 300 is
        // below the pointer, so the slot is between 200 and 300.
        let lane = lane(Status::Todo, &[100, 200, 300]);
        assert_eq!(insertion_index(&lane, "dragged", 250), 2);
    }

    #[test]
    fn test_insertion_above_all_cards() {
        let lane = lane(Status::Todo, &[100, 200, 300]);
        assert_eq!(insertion_index(&lane, "dragged", 50), 0);
    }

    #[test]
    fn test_insertion_below_all_cards_is_end() {
        let lane = lane(Status::Todo, &[100, 200, 300]);
        assert_eq!(insertion_index(&lane, "dragged", 350), 3);
    }

    #[test]
    fn test_insertion_into_empty_lane() {
        let lane = lane(Status::Feedback, &[]);
        assert_eq!(insertion_index(&lane, "dragged", 10), 0);
    }

    #[test]
    fn test_insertion_skips_the_dragged_card() {
        let mut lane = lane(Status::Todo, &[100, 200, 300]);
        lane.cards[2].task_id = "dragged".to_string();
        // The card at 300 is the dragged one, so nothing is below the
        // pointer and the slot is the end of the remaining two.
        assert_eq!(insertion_index(&lane, "dragged", 250), 2);
    }

    #[test]
    fn test_second_grab_is_rejected() {
        let mut drag = DragState::default();
        assert!(drag.begin("a", 5));
        assert!(!drag.begin("b", 5));
        assert_eq!(drag.dragged_id(), Some("a"));
    }

    #[test]
    fn test_release_without_movement_is_a_click() {
        let hits = BoardHits {
            lanes: vec![lane(Status::Todo, &[10])],
        };
        let mut drag = DragState::default();
        drag.begin("a", 4);
        assert_eq!(
            drag.settle(&hits, 5, 10),
            Some(Settle::Click {
                task_id: "a".to_string()
            })
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn test_drop_over_lane_commits_status_and_slot() {
        let hits = BoardHits {
            lanes: vec![lane(Status::Progress, &[10, 20])],
        };
        let mut drag = DragState::default();
        drag.begin("a", 4);
        drag.update(&hits, 5, 15);
        assert_eq!(
            drag.hover(),
            Some(Hover {
                status: Status::Progress,
                insert_index: 1
            })
        );
        assert_eq!(
            drag.settle(&hits, 5, 15),
            Some(Settle::Drop {
                task_id: "a".to_string(),
                status: Status::Progress,
                insert_index: 1,
            })
        );
    }

    #[test]
    fn test_release_outside_any_lane_cancels() {
        let hits = BoardHits {
            lanes: vec![LaneHit {
                status: Status::Todo,
                area: Rect::new(0, 0, 10, 10),
                cards: Vec::new(),
            }],
        };
        let mut drag = DragState::default();
        drag.begin("a", 4);
        // Drag out of the board entirely: hover clears, release cancels.
        drag.update(&hits, 50, 50);
        assert_eq!(drag.hover(), None);
        assert_eq!(drag.settle(&hits, 50, 50), Some(Settle::Cancelled));
    }

    #[test]
    fn test_cancel_resets_to_idle() {
        let mut drag = DragState::default();
        drag.begin("a", 4);
        assert!(drag.cancel());
        assert!(!drag.is_active());
        assert!(!drag.cancel());
    }
}
