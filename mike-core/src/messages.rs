//! Text Mike says that does not depend on a command's result.

pub const GREETING: &str = "Hello, I'm Mike Wazowski.\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Put that thing back where it came from or so help me!";

/// `1 task` or `<n> tasks`.
#[must_use]
pub fn task_count(count: usize) -> String {
    if count == 1 {
        String::from("1 task")
    } else {
        format!("{count} tasks")
    }
}
