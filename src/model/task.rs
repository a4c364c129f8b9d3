use serde::{Deserialize, Serialize};

/// A single todo item. Tasks nest: `children` holds subtasks in display
/// order. In the stored JSON `children` may be absent entirely — both
/// forms deserialize to an empty vec and an empty vec serializes to
/// nothing, so absence and emptiness round-trip as the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text as entered by the user
    pub text: String,
    /// Checkbox state
    pub completed: bool,
    /// Subtasks (recursive)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Task>,
}

impl Task {
    /// Create a new, uncompleted task with no children
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
            children: Vec::new(),
        }
    }
}
