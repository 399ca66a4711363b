use std::{fmt::Write, str::FromStr};

use color_eyre::{Result, eyre::eyre};
use strum::IntoEnumIterator;

use crate::{
    sorter,
    task::{DateAttribute, Task},
};

/// How the `list` command shows the tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    /// Every task in insertion order.
    #[default]
    All,
    /// Tasks having a date for `attribute`, sorted by that date.
    Date { attribute: String },
}

/// Ordered collection of tasks. Indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: vec![] }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn remove(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Renders the tasks for a `ListView`, one numbered task per line.
    /// Every line starts with a newline so the result can follow a header.
    ///
    /// Numbers are positions in the whole list, even when the view filters tasks out.
    ///
    /// # Errors
    ///
    /// Will return an error if the view's attribute is not a known date attribute.
    pub fn view(&self, view: &ListView) -> Result<String> {
        let mut res = String::new();
        match view {
            ListView::All => {
                for (index, task) in self.tasks.iter().enumerate() {
                    write!(res, "\n{}. {task}", index + 1)?;
                }
            }
            ListView::Date { attribute } => {
                let date_attribute = DateAttribute::from_str(attribute).map_err(|_| {
                    eyre!(
                        "'{attribute}' is not a date attribute. Try one of: {}.",
                        DateAttribute::iter()
                            .map(|a| a.to_string())
                            .collect::<Vec<String>>()
                            .join(", ")
                    )
                })?;
                let sorted = sorter::sort_by_date(&self.tasks, date_attribute);
                if sorted.is_empty() {
                    write!(res, "\nNo task has a date for '{date_attribute}'.")?;
                }
                for (index, task) in sorted {
                    write!(res, "\n{}. {task}", index + 1)?;
                }
            }
        }
        Ok(res)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<T: IntoIterator<Item = Task>>(iter: T) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
