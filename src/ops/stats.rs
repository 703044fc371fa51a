//! Summary figures for the board.

use chrono::NaiveDate;

use crate::model::{Priority, Status, Task};

/// Counts and deadlines shown on the summary view / `summary` subcommand.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BoardStats {
    pub todo: usize,
    pub progress: usize,
    pub feedback: usize,
    pub done: usize,
    pub total: usize,
    pub urgent: usize,
    /// Due date of the urgent task closest to `today`.
    pub next_urgent_due: Option<NaiveDate>,
}

/// Compute summary figures from the cached task list.
pub fn compute(tasks: &[Task], today: NaiveDate) -> BoardStats {
    let count = |status: Status| tasks.iter().filter(|t| t.status == status).count();

    let next_urgent_due = tasks
        .iter()
        .filter(|t| t.priority == Priority::Urgent)
        .filter_map(|t| t.due_date)
        .min_by_key(|due| (*due - today).num_days().abs());

    BoardStats {
        todo: count(Status::Todo),
        progress: count(Status::Progress),
        feedback: count(Status::Feedback),
        done: count(Status::Done),
        total: tasks.len(),
        urgent: tasks
            .iter()
            .filter(|t| t.priority == Priority::Urgent)
            .count(),
        next_urgent_due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: Status, priority: Priority, due: Option<(i32, u32, u32)>) -> Task {
        let mut t = Task::new("t", status);
        t.priority = priority;
        t.due_date = due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        t
    }

    #[test]
    fn test_counts_per_status_and_urgent() {
        let tasks = vec![
            task(Status::Todo, Priority::Urgent, None),
            task(Status::Todo, Priority::Low, None),
            task(Status::Done, Priority::Urgent, None),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let stats = compute(&tasks, today);
        assert_eq!(stats.todo, 2);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.progress, 0);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.urgent, 2);
        assert_eq!(stats.next_urgent_due, None);
    }

    #[test]
    fn test_next_urgent_due_picks_closest_date() {
        let tasks = vec![
            task(Status::Todo, Priority::Urgent, Some((2026, 3, 1))),
            task(Status::Todo, Priority::Urgent, Some((2026, 1, 10))),
            // Non-urgent deadlines don't count.
            task(Status::Todo, Priority::Medium, Some((2026, 1, 2))),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let stats = compute(&tasks, today);
        assert_eq!(stats.next_urgent_due, NaiveDate::from_ymd_opt(2026, 1, 10));
    }
}
