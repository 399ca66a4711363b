use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

use crate::{
    task::{State, Task, TaskKind, TaskType},
    task_list::TaskList,
};

const CORRUPTED: &str = "File corrupted. Unable to load saved data.";
const SEPARATOR: char = ',';
const ESCAPE: char = '\\';

/// Reads and writes a `TaskList` as a flat file, one task per line:
/// `type,description,done[,date...]`.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the tasks. A missing file is an empty list, its directory gets created.
    ///
    /// # Errors
    ///
    /// Will return an error if the file can't be read or one of its lines is not a task.
    pub fn load(&self) -> Result<TaskList> {
        if !self.file_path.exists() {
            if let Some(parent) = self.file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            info!(
                "No task file at {}, starting with an empty list",
                self.file_path.display()
            );
            return Ok(TaskList::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .wrap_err_with(|| format!("Failed to read {}", self.file_path.display()))?;
        let tasks = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(decode_task)
            .collect::<Result<TaskList>>()?;

        info!(
            "Loaded {} tasks from {}",
            tasks.size(),
            self.file_path.display()
        );
        Ok(tasks)
    }

    /// Writes every task, replacing the previous file content.
    ///
    /// The content is first written to a temporary file which is then renamed.
    ///
    /// # Errors
    ///
    /// Will return an error if the file can't be written.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        let mut content = String::new();
        for task in tasks {
            content.push_str(&encode_task(task));
            content.push('\n');
        }

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, content)
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.file_path)
            .wrap_err_with(|| format!("Failed to write {}", self.file_path.display()))?;

        debug!(
            "Saved {} tasks to {}",
            tasks.size(),
            self.file_path.display()
        );
        Ok(())
    }
}

#[must_use]
pub fn encode_task(task: &Task) -> String {
    let mut fields = vec![
        task.task_type().to_string(),
        task.description.clone(),
        task.is_done().to_string(),
    ];
    match &task.kind {
        TaskKind::Todo => (),
        TaskKind::Deadline { by } => fields.push(by.clone()),
        TaskKind::Event { from, to } => {
            fields.push(from.clone());
            fields.push(to.clone());
        }
    }
    fields
        .iter()
        .map(|field| escape(field))
        .collect::<Vec<String>>()
        .join(&SEPARATOR.to_string())
}

/// # Errors
///
/// Will return an error if the task type is unknown or a field is missing.
pub fn decode_task(line: &str) -> Result<Task> {
    let fields = split_fields(line);
    let field = |index: usize| {
        fields
            .get(index)
            .cloned()
            .ok_or_else(|| eyre!(CORRUPTED))
    };

    let task_type = TaskType::from_str(&field(0)?).map_err(|_| eyre!(CORRUPTED))?;
    let description = field(1)?;
    let mut task = match task_type {
        TaskType::Todo => Task::todo(description),
        TaskType::Deadline => Task::deadline(description, field(3)?),
        TaskType::Event => Task::event(description, field(3)?, field(4)?),
    };
    if field(2)? == "true" {
        task.state = State::Done;
    }
    Ok(task)
}

fn escape(field: &str) -> String {
    let mut res = String::with_capacity(field.len());
    for c in field.chars() {
        if c == SEPARATOR || c == ESCAPE {
            res.push(ESCAPE);
        }
        res.push(c);
    }
    res
}

/// Splits on unescaped separators. A backslash only escapes a separator or another
/// backslash, so files with plain backslashes in them still read the same.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => current.push(
                chars
                    .next_if(|next| *next == SEPARATOR || *next == ESCAPE)
                    .unwrap_or(ESCAPE),
            ),
            SEPARATOR => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
