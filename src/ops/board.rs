//! Pure board operations: lane partitioning and quick-move adjacency.

use crate::model::{Status, Task};

/// Partition tasks into the four fixed lanes, preserving list order.
///
/// Every task lands in exactly one lane (the one matching its status); the
/// union of the lanes is the input set.
pub fn partition<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> [Vec<&'a Task>; 4] {
    let mut lanes: [Vec<&Task>; 4] = Default::default();
    for task in tasks {
        lanes[task.status.index()].push(task);
    }
    lanes
}

/// The statuses a task can be quick-moved to: only the adjacent stages in
/// board order. The first stage offers only "forward", the last only
/// "backward".
pub fn quick_moves(status: Status) -> Vec<Status> {
    [status.prev(), status.next()].into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: Status) -> Task {
        let mut t = Task::new(id, status);
        t.id = id.to_string();
        t
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let tasks = vec![
            task("a", Status::Done),
            task("b", Status::Todo),
            task("c", Status::Progress),
            task("d", Status::Todo),
            task("e", Status::Feedback),
        ];
        let lanes = partition(&tasks);

        let ids = |lane: &[&Task]| lane.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&lanes[0]), ["b", "d"]);
        assert_eq!(ids(&lanes[1]), ["c"]);
        assert_eq!(ids(&lanes[2]), ["e"]);
        assert_eq!(ids(&lanes[3]), ["a"]);

        let total: usize = lanes.iter().map(Vec::len).sum();
        assert_eq!(total, tasks.len());
        for (i, lane) in lanes.iter().enumerate() {
            for t in lane {
                assert_eq!(t.status.index(), i);
            }
        }
    }

    #[test]
    fn test_partition_empty_input() {
        let lanes = partition([]);
        assert!(lanes.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_quick_move_boundaries() {
        assert_eq!(quick_moves(Status::Todo), vec![Status::Progress]);
        assert_eq!(quick_moves(Status::Done), vec![Status::Feedback]);
        assert_eq!(
            quick_moves(Status::Progress),
            vec![Status::Todo, Status::Feedback]
        );
        assert_eq!(
            quick_moves(Status::Feedback),
            vec![Status::Progress, Status::Done]
        );
    }
}
