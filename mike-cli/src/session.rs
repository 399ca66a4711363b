use std::{
    fmt::Write as _,
    io::{BufRead, Write},
};

use color_eyre::Result;
use mike_core::{Storage, TaskList, messages::GREETING, parse_command};
use tracing::{debug, info, warn};

use crate::config::Config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub prompt: String,
    pub greet: bool,
    pub autosave: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            prompt: String::from("> "),
            greet: true,
            autosave: true,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            prompt: config.cli.prompt.clone(),
            greet: config.cli.greet,
            autosave: config.core.autosave,
        }
    }
}

/// One conversation with Mike: reads commands line by line and answers each one.
pub struct Session {
    tasks: TaskList,
    storage: Storage,
    options: SessionOptions,
    unsaved: bool,
}

impl Session {
    pub const fn new(tasks: TaskList, storage: Storage, options: SessionOptions) -> Self {
        Self {
            tasks,
            storage,
            options,
            unsaved: false,
        }
    }

    /// Starts a session on the tasks saved in `storage`.
    ///
    /// Tasks that can't be loaded are not fatal: the session starts with an empty list
    /// and the reason is returned so it can be shown to the user.
    pub fn open(storage: Storage, options: SessionOptions) -> (Self, Option<String>) {
        match storage.load() {
            Ok(tasks) => (Self::new(tasks, storage, options), None),
            Err(e) => {
                warn!(
                    "Failed to load tasks from {}: {e:#}",
                    storage.file_path().display()
                );
                (
                    Self::new(TaskList::new(), storage, options),
                    Some(e.to_string()),
                )
            }
        }
    }

    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Parses and executes one line. Returns the response and whether the session is over.
    pub fn handle_line(&mut self, line: &str) -> (String, bool) {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                debug!("Rejected {line:?}: {e}");
                return (e.to_string(), false);
            }
        };

        match command.execute(&mut self.tasks) {
            Ok(mut response) => {
                if command.is_mutating() {
                    self.unsaved = true;
                    if self.options.autosave
                        && let Err(e) = self.save()
                    {
                        let _ = write!(response, "\n{e:#}");
                    }
                }
                (response, command.is_exit())
            }
            Err(e) => {
                debug!("Failed to execute {command:?}: {e}");
                (e.to_string(), false)
            }
        }
    }

    /// Reads commands from `reader` until `bye` or the end of the input.
    ///
    /// # Errors
    ///
    /// Will return an error if `writer` can't be written to.
    pub fn run(&mut self, reader: impl BufRead, mut writer: impl Write) -> Result<()> {
        if self.options.greet {
            writeln!(writer, "{GREETING}")?;
        }

        let mut lines = reader.lines();
        loop {
            write!(writer, "{}", self.options.prompt)?;
            writer.flush()?;

            let Some(line) = lines.next() else {
                info!("End of input");
                break;
            };
            let (response, exit) = self.handle_line(&line?);
            writeln!(writer, "{response}")?;
            if exit {
                break;
            }
        }

        if self.unsaved
            && let Err(e) = self.save()
        {
            writeln!(writer, "{e:#}")?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match self.storage.save(&self.tasks) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save tasks: {e:#}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{fs, io::Cursor};

    use mike_core::{Storage, TaskList, messages::FAREWELL};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::{Session, SessionOptions};

    fn options(autosave: bool) -> SessionOptions {
        SessionOptions {
            prompt: String::new(),
            greet: false,
            autosave,
        }
    }

    fn run(session: &mut Session, input: &str) -> String {
        let mut output = vec![];
        session.run(Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_autosave_writes_after_each_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut session = Session::new(TaskList::new(), Storage::new(&path), options(true));

        let (response, exit) = session.handle_line("todo read book");
        assert!(!exit);
        assert!(response.starts_with("Got it."));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Todo,read book,false\n");

        session.handle_line("mark 1");
        assert_eq!(fs::read_to_string(&path).unwrap(), "Todo,read book,true\n");
    }

    #[test]
    fn test_list_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut session = Session::new(TaskList::new(), Storage::new(&path), options(true));
        session.handle_line("list");
        assert!(!path.exists());
    }

    #[test]
    fn test_without_autosave_saves_at_the_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut session = Session::new(TaskList::new(), Storage::new(&path), options(false));

        session.handle_line("deadline essay /by Friday");
        assert!(!path.exists());

        run(&mut session, "bye\n");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Deadline,essay,false,Friday\n"
        );
    }

    #[test]
    fn test_exit_stops_reading() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(
            TaskList::new(),
            Storage::new(dir.path().join("tasks.txt")),
            options(true),
        );
        let output = run(&mut session, "todo a\nbye\ntodo b\n");
        assert!(output.ends_with(&format!("{FAREWELL}\n")));
        assert_eq!(session.tasks().size(), 1);
    }

    #[test]
    fn test_errors_keep_the_session_going() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(
            TaskList::new(),
            Storage::new(dir.path().join("tasks.txt")),
            options(true),
        );
        let output = run(&mut session, "hello\nmark 1\ntodo\ntodo a\n");
        assert_eq!(
            output,
            "'hello' is not recognized as a command.\nThat is the weirdest thing you've ever said.\n\
There are no tasks to mark. Please add a task first.\n\
Description missing.\nUsage: todo [description]\n\
Got it. I've added this task:\n  [T][ ] a\nNow you have 1 task in the list.\n"
        );
        assert_eq!(session.tasks().size(), 1);
    }

    #[test]
    fn test_open_loads_saved_tasks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "Todo,a,false\nDeadline,b,true,Friday\n").unwrap();

        let (session, error) = Session::open(Storage::new(&path), options(true));
        assert_eq!(error, None);
        assert_eq!(session.tasks().size(), 2);
    }

    #[test]
    fn test_open_corrupted_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "Homework,b,true\n").unwrap();

        let (mut session, error) = Session::open(Storage::new(&path), options(true));
        assert_eq!(
            error.as_deref(),
            Some("File corrupted. Unable to load saved data.")
        );
        assert!(session.tasks().is_empty());

        let output = run(&mut session, "todo a\n");
        assert_eq!(
            output,
            "Got it. I've added this task:\n  [T][ ] a\nNow you have 1 task in the list.\n"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "Todo,a,false\n");
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        // A directory where the data file should be makes every save fail
        let path = dir.path().join("tasks.txt");
        fs::create_dir(&path).unwrap();
        let mut session = Session::new(TaskList::new(), Storage::new(&path), options(true));

        let (response, exit) = session.handle_line("todo a");
        assert!(!exit);
        assert!(response.starts_with("Got it. I've added this task:"));
        assert!(response.contains("\nFailed to write"), "{response}");
        assert_eq!(session.tasks().size(), 1);
    }

    #[test]
    fn test_greeting_and_prompt() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(
            TaskList::new(),
            Storage::new(dir.path().join("tasks.txt")),
            SessionOptions::default(),
        );
        let output = run(&mut session, "");
        assert_eq!(output, "Hello, I'm Mike Wazowski.\nWhat can I do for you?\n> ");
    }
}
