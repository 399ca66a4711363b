use std::fmt;

use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumString};

/// A task's state
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum State {
    #[default]
    ToDo,
    Done,
}

impl State {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::ToDo => ' ',
            Self::Done => 'X',
        }
    }
}

/// Date fields a task list can be viewed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
pub enum DateAttribute {
    #[strum(to_string = "due", serialize = "by")]
    Due,
    #[strum(to_string = "start", serialize = "from")]
    Start,
    #[strum(to_string = "end", serialize = "to")]
    End,
}

/// Dates are kept as the user typed them.
#[derive(Debug, Hash, Eq, PartialEq, Clone, EnumDiscriminants)]
#[strum_discriminants(name(TaskType), derive(Display, EnumString))]
pub enum TaskKind {
    Todo,
    Deadline { by: String },
    Event { from: String, to: String },
}

#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct Task {
    pub description: String,
    pub state: State,
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Deadline { by: by.into() })
    }

    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::new(
            description,
            TaskKind::Event {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    fn new(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            state: State::ToDo,
            kind,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Marks the task as done and returns the confirmation shown to the user.
    /// Marking a task that is already done is not an error.
    pub fn mark_as_done(&mut self) -> String {
        self.state = State::Done;
        format!("Nice! I've marked this task as done:\n  {self}")
    }

    pub fn mark_as_not_done(&mut self) -> String {
        self.state = State::ToDo;
        format!("OK, I've marked this task as not done yet:\n  {self}")
    }

    #[must_use]
    pub fn task_type(&self) -> TaskType {
        TaskType::from(&self.kind)
    }

    /// Returns the date stored for `attribute`, if this kind of task has one.
    #[must_use]
    pub fn date(&self, attribute: DateAttribute) -> Option<&str> {
        match (&self.kind, attribute) {
            (TaskKind::Deadline { by }, DateAttribute::Due) => Some(by),
            (TaskKind::Event { from, .. }, DateAttribute::Start) => Some(from),
            (TaskKind::Event { to, .. }, DateAttribute::End) => Some(to),
            _ => None,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        };
        write!(f, "[{tag}][{}] {}", self.state.symbol(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {by})"),
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}
