use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque task identifier.
///
/// New ids are short hex strings, but any string read back from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Length of freshly generated ids
    pub const LEN: usize = 8;

    /// Generate a new random id
    pub fn generate() -> Self {
        let mut simple = Uuid::new_v4().simple().to_string();
        simple.truncate(Self::LEN);
        Self(simple)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Category name (blank in old data means the default category)
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
    /// Milliseconds since the Unix epoch
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: i64,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    pub fn new(id: TaskId, title: String, category: String, created_at: i64) -> Self {
        Self {
            id,
            title,
            category,
            done: false,
            created_at,
        }
    }

    /// Flip the done flag
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// Checkbox glyph for list rendering
    pub fn checkbox(&self) -> &'static str {
        if self.done {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// Issues `createdAt` stamps that never go backwards within a process
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last: i64,
}

impl Clock {
    /// Clock that will not issue anything earlier than `last`
    pub fn starting_at(last: i64) -> Self {
        Self { last }
    }

    /// Current time in epoch millis, clamped to the last issued value
    pub fn now_millis(&mut self) -> i64 {
        self.stamp(chrono::Utc::now().timestamp_millis())
    }

    fn stamp(&mut self, wall: i64) -> i64 {
        self.last = self.last.max(wall);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_read_as_defaults() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a","title":"legacy","category":null,"done":null,"createdAt":null}"#,
        )
        .unwrap();

        assert_eq!(task.category, "");
        assert!(!task.done);
        assert_eq!(task.created_at, 0);
    }

    #[test]
    fn test_generated_ids_are_short_hex() {
        let id = TaskId::generate();
        assert_eq!(id.as_str().len(), TaskId::LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::new(TaskId::from("abc1234"), "Buy milk".into(), "Werk".into(), 42);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "abc1234");
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["category"], "Werk");
        assert_eq!(json["done"], false);
        assert_eq!(json["createdAt"], 42);
    }

    #[test]
    fn test_task_tolerates_missing_and_extra_fields() {
        let json = r#"{"id":"x1","title":"Old","priority":3}"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id.as_str(), "x1");
        assert_eq!(task.category, "");
        assert!(!task.done);
        assert_eq!(task.created_at, 0);
    }

    #[test]
    fn test_toggle() {
        let mut task = Task::new(TaskId::generate(), "t".into(), "Werk".into(), 0);
        assert_eq!(task.checkbox(), "[ ]");
        task.toggle();
        assert!(task.done);
        assert_eq!(task.checkbox(), "[x]");
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut clock = Clock::default();
        assert_eq!(clock.stamp(100), 100);
        assert_eq!(clock.stamp(90), 100);
        assert_eq!(clock.stamp(150), 150);

        let mut seeded = Clock::starting_at(1_000);
        assert_eq!(seeded.stamp(10), 1_000);
    }
}
