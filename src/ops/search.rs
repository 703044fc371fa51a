//! Board search: a pure view filter over the cached tasks.
//!
//! Filtering never mutates the cache — it only changes which subset of
//! tasks the lanes draw.

use regex::Regex;

use crate::model::Task;

/// Compile a query case-insensitively, falling back to a literal match
/// when the input is not a valid pattern.
pub fn compile_query(query: &str) -> Option<Regex> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){query}"))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(query))))
        .ok()
}

/// Whether a task matches the query (title or description).
pub fn matches(task: &Task, re: &Regex) -> bool {
    re.is_match(&task.title) || re.is_match(&task.description)
}

/// The cached tasks that match, in cache order.
pub fn filter<'a>(tasks: &'a [Task], re: &Regex) -> Vec<&'a Task> {
    tasks.iter().filter(|t| matches(t, re)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn task(title: &str, description: &str) -> Task {
        let mut t = Task::new(title, Status::Todo);
        t.description = description.to_string();
        t
    }

    #[test]
    fn test_filter_is_case_insensitive_and_checks_both_fields() {
        let tasks = vec![
            task("Fix login", ""),
            task("Write docs", "covers the LOGIN flow"),
            task("Refactor", "nothing relevant"),
        ];
        let re = compile_query("login").unwrap();
        let hits = filter(&tasks, &re);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let tasks = vec![task("weird title ((", "")];
        let re = compile_query("((").unwrap();
        assert_eq!(filter(&tasks, &re).len(), 1);
    }

    #[test]
    fn test_blank_query_compiles_to_none() {
        assert!(compile_query("   ").is_none());
        assert!(compile_query("").is_none());
    }
}
