use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Board status — one lane per value, in this fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Todo,
    Progress,
    Feedback,
    Done,
}

impl Status {
    /// All statuses in board order.
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::Progress,
        Status::Feedback,
        Status::Done,
    ];

    /// Position of this status in the fixed board order.
    pub fn index(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::Progress => 1,
            Status::Feedback => 2,
            Status::Done => 3,
        }
    }

    /// Lane header label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To do",
            Status::Progress => "In progress",
            Status::Feedback => "Await feedback",
            Status::Done => "Done",
        }
    }

    /// The next status in board order, if any.
    pub fn next(self) -> Option<Status> {
        Status::ALL.get(self.index() + 1).copied()
    }

    /// The previous status in board order, if any.
    pub fn prev(self) -> Option<Status> {
        self.index().checked_sub(1).map(|i| Status::ALL[i])
    }

    /// Parse the wire/CLI spelling (`Todo`, `Progress`, `Feedback`, `Done`).
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Some(Status::Todo),
            "progress" => Some(Status::Progress),
            "feedback" => Some(Status::Feedback),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Glyph shown on cards.
    pub fn glyph(self) -> &'static str {
        match self {
            Priority::Urgent => "↑↑",
            Priority::Medium => "==",
            Priority::Low => "↓↓",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// A checklist entry inside a task. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// A task as held in the cache and exchanged with the store.
///
/// The id is the record's key in the store, not part of the record body —
/// the store client fills it in after load/create and it is skipped on
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Assigned contact ids, insertion order preserved for avatar display.
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create a task with the given title and status; everything else empty.
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Task {
            id: String::new(),
            title: title.into(),
            description: String::new(),
            status,
            priority: Priority::default(),
            category: String::new(),
            due_date: None,
            assigned_to: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    /// Append a subtask, assigning the next free subtask id.
    pub fn add_subtask(&mut self, text: impl Into<String>) -> u32 {
        let id = self.subtasks.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        self.subtasks.push(Subtask {
            id,
            text: text.into(),
            done: false,
        });
        id
    }

    /// Completed/total subtask counts for the card progress bar.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.done).count();
        (done, self.subtasks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_and_adjacency() {
        assert_eq!(Status::Todo.next(), Some(Status::Progress));
        assert_eq!(Status::Todo.prev(), None);
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::Done.prev(), Some(Status::Feedback));
        assert_eq!(Status::Progress.index(), 1);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(Status::parse("todo"), Some(Status::Todo));
        assert_eq!(Status::parse(" Feedback "), Some(Status::Feedback));
        assert_eq!(Status::parse("archived"), None);
    }

    #[test]
    fn test_task_wire_format_round_trip() {
        let json = r#"{
            "title": "Ship release",
            "description": "Cut the build",
            "status": "Progress",
            "priority": "Urgent",
            "category": "Technical Task",
            "dueDate": "2026-03-01",
            "assignedTo": ["c0001", "c0002"],
            "subtasks": [{"id": 1, "text": "tag", "done": true}]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, Status::Progress);
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.assigned_to, vec!["c0001", "c0002"]);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["status"], "Progress");
        assert_eq!(back["dueDate"], "2026-03-01");
        // The id is the store key, never part of the record body.
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let task: Task = serde_json::from_str(r#"{"status": "Todo"}"#).unwrap();
        assert!(task.assigned_to.is_empty());
        assert!(task.subtasks.is_empty());
        assert!(task.due_date.is_none());
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_add_subtask_assigns_monotonic_ids() {
        let mut task = Task::new("a", Status::Todo);
        assert_eq!(task.add_subtask("one"), 1);
        assert_eq!(task.add_subtask("two"), 2);
        task.subtasks.remove(0);
        // Ids are never reused, even after a removal.
        assert_eq!(task.add_subtask("three"), 3);
        assert_eq!(task.subtask_progress(), (0, 2));
    }
}
