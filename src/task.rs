use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    #[serde(rename = "task")]
    pub description: String,
    pub done: bool,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.done {
            "✅ Done"
        } else {
            "❌ Not Done"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_done() {
        let task = Task::new("Buy milk");
        assert_eq!(task.description, "Buy milk");
        assert!(!task.done);
    }

    #[test]
    fn serializes_with_task_key() {
        let json = serde_json::to_string(&Task::new("Buy milk")).unwrap();
        assert_eq!(json, r#"{"task":"Buy milk","done":false}"#);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let task: Task =
            serde_json::from_str(r#"{"task":"pay rent","done":false,"priority":1}"#).unwrap();
        assert_eq!(task, Task::new("pay rent"));
        assert_eq!(
            serde_json::to_string(&task).unwrap(),
            r#"{"task":"pay rent","done":false}"#
        );
    }
}
