use color_eyre::{
    Result,
    eyre::{bail, eyre},
};
use tracing::debug;

use crate::{
    messages::{self, FAREWELL},
    task::Task,
    task_list::{ListView, TaskList},
};

/// A parsed and validated user request.
///
/// Task numbers are 1-based and only checked against the task list when executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List(ListView),
    Mark {
        task_number: i32,
    },
    Unmark {
        task_number: i32,
    },
    AddTodo {
        description: String,
    },
    AddDeadline {
        description: String,
        deadline: String,
    },
    AddEvent {
        description: String,
        start_date: String,
        end_date: String,
    },
    Delete {
        task_number: i32,
    },
}

impl Command {
    /// Runs the command against `tasks` and returns the response for the user.
    ///
    /// # Errors
    ///
    /// Will return an error if the command refers to a task that does not exist,
    /// or if there are no tasks to list.
    pub fn execute(&self, tasks: &mut TaskList) -> Result<String> {
        debug!("Executing {self:?}");
        match self {
            Self::Exit => Ok(FAREWELL.to_owned()),
            Self::List(view) => {
                if tasks.is_empty() {
                    bail!("You have no more tasks Sulley...");
                }
                Ok(format!(
                    "You and I are a team.\nHere is the task list:{}",
                    tasks.view(view)?
                ))
            }
            Self::Mark { task_number } => {
                let task = Self::task_mut(tasks, *task_number, "mark")?;
                Ok(task.mark_as_done())
            }
            Self::Unmark { task_number } => {
                let task = Self::task_mut(tasks, *task_number, "mark")?;
                Ok(task.mark_as_not_done())
            }
            Self::AddTodo { description } => Ok(Self::add(tasks, Task::todo(description))),
            Self::AddDeadline {
                description,
                deadline,
            } => Ok(Self::add(tasks, Task::deadline(description, deadline))),
            Self::AddEvent {
                description,
                start_date,
                end_date,
            } => Ok(Self::add(
                tasks,
                Task::event(description, start_date, end_date),
            )),
            Self::Delete { task_number } => {
                let index = Self::task_index(tasks, *task_number, "delete")?;
                let task = tasks
                    .remove(index)
                    .ok_or_else(|| eyre!("Task {task_number} disappeared"))?;
                Ok(format!(
                    "Noted. I've removed this task:\n  {task}\nNow you have {} in the list.",
                    messages::task_count(tasks.size())
                ))
            }
        }
    }

    /// Whether the session should stop after this command.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Whether executing this command changes the task list.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Exit | Self::List(_))
    }

    fn add(tasks: &mut TaskList, task: Task) -> String {
        let response = format!("Got it. I've added this task:\n  {task}");
        tasks.add(task);
        format!(
            "{response}\nNow you have {} in the list.",
            messages::task_count(tasks.size())
        )
    }

    fn task_mut<'a>(tasks: &'a mut TaskList, task_number: i32, action: &str) -> Result<&'a mut Task> {
        let index = Self::task_index(tasks, task_number, action)?;
        tasks
            .get_mut(index)
            .ok_or_else(|| eyre!("Task {task_number} disappeared"))
    }

    /// Turns a 1-based task number into an index of `tasks`.
    fn task_index(tasks: &TaskList, task_number: i32, action: &str) -> Result<usize> {
        if tasks.is_empty() {
            bail!("There are no tasks to {action}. Please add a task first.");
        }
        usize::try_from(i64::from(task_number) - 1)
            .ok()
            .filter(|index| *index < tasks.size())
            .ok_or_else(|| {
                eyre!(
                    "That's suspicious. Please enter a number in the range 1-{}.",
                    tasks.size()
                )
            })
    }
}
