pub mod command;
pub mod config;
pub mod logging;
pub mod messages;
pub mod parser;
pub mod sorter;
pub mod storage;
pub mod task;
pub mod task_list;

pub use command::Command;
pub use logging::init as init_logging;
pub use parser::parse_command;
pub use storage::Storage;
pub use task_list::{ListView, TaskList};
