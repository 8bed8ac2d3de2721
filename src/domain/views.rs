use super::category::{compare_names, default_category};
use super::task::{Task, TaskId};
use std::collections::BTreeMap;

/// Category a task is grouped under
pub fn effective_category(task: &Task) -> &str {
    if task.category.trim().is_empty() {
        default_category()
    } else {
        &task.category
    }
}

/// Group tasks by category, newest first within each group.
///
/// Tasks with a blank category land under the default category. Ties on
/// `created_at` are broken by id so the result does not depend on input order.
pub fn group_by_category(tasks: &[Task]) -> BTreeMap<String, Vec<Task>> {
    let mut groups: BTreeMap<String, Vec<Task>> = BTreeMap::new();

    for task in tasks {
        groups
            .entry(effective_category(task).to_string())
            .or_default()
            .push(task.clone());
    }

    for list in groups.values_mut() {
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    groups
}

/// Category names in display order
pub fn sorted_names(categories: &[String]) -> Vec<String> {
    let mut names = categories.to_vec();
    names.sort_by(|a, b| compare_names(a, b));
    names
}

/// Total and completed counts for one group
pub fn counts(tasks: &[Task]) -> (usize, usize) {
    let done = tasks.iter().filter(|t| t.done).count();
    (tasks.len(), done)
}

/// Section header summary, e.g. "3 tasks • 1 done"
pub fn summary(total: usize, done: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("{} {} • {} done", total, noun, done)
}

/// A row in the rendered task pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Category section header
    Header { name: String, total: usize, done: usize },
    /// A task within the preceding section
    Task(TaskId),
    /// Placeholder for a section with no tasks
    Empty,
}

impl Row {
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Row::Task(id) => Some(id),
            _ => None,
        }
    }
}

/// Flatten the grouped view into rows for the given section names
pub fn flatten_sections(groups: &BTreeMap<String, Vec<Task>>, names: &[String]) -> Vec<Row> {
    let mut rows = Vec::new();

    for name in names {
        let items = groups.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let (total, done) = counts(items);
        rows.push(Row::Header {
            name: name.clone(),
            total,
            done,
        });

        if items.is_empty() {
            rows.push(Row::Empty);
        }
        for task in items {
            rows.push(Row::Task(task.id.clone()));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, category: &str, created_at: i64, done: bool) -> Task {
        let mut t = Task::new(TaskId::from(id), id.to_string(), category.to_string(), created_at);
        t.done = done;
        t
    }

    #[test]
    fn test_group_sorts_newest_first() {
        let tasks = vec![
            task("a", "Werk", 1, false),
            task("b", "Werk", 3, false),
            task("c", "Health", 2, true),
            task("d", "Werk", 2, false),
        ];

        let groups = group_by_category(&tasks);
        let werk: Vec<&str> = groups["Werk"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(werk, vec!["b", "d", "a"]);
        assert_eq!(groups["Health"].len(), 1);
    }

    #[test]
    fn test_group_blank_category_uses_default() {
        let tasks = vec![task("a", "", 1, false), task("b", "  ", 2, false)];
        let groups = group_by_category(&tasks);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Werk"].len(), 2);
    }

    #[test]
    fn test_group_is_order_independent() {
        let tasks = vec![
            task("a", "Werk", 5, false),
            task("b", "Werk", 5, true),
            task("c", "Vrije tijd", 1, false),
            task("d", "Werk", 7, false),
        ];
        let mut reversed = tasks.clone();
        reversed.reverse();
        let mut rotated = tasks.clone();
        rotated.rotate_left(2);

        assert_eq!(group_by_category(&tasks), group_by_category(&reversed));
        assert_eq!(group_by_category(&tasks), group_by_category(&rotated));
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(1, 0), "1 task • 0 done");
        assert_eq!(summary(3, 2), "3 tasks • 2 done");
    }

    #[test]
    fn test_flatten_sections() {
        let tasks = vec![task("a", "Werk", 1, true), task("b", "Werk", 2, false)];
        let groups = group_by_category(&tasks);
        let names = vec!["Health".to_string(), "Werk".to_string()];

        let rows = flatten_sections(&groups, &names);
        assert_eq!(
            rows,
            vec![
                Row::Header { name: "Health".into(), total: 0, done: 0 },
                Row::Empty,
                Row::Header { name: "Werk".into(), total: 2, done: 1 },
                Row::Task(TaskId::from("b")),
                Row::Task(TaskId::from("a")),
            ]
        );
    }
}
