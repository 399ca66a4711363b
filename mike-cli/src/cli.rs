use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mike_core::config::{get_config_dir, get_data_dir};

/// Mike keeps track of your tasks. Type `todo`, `deadline`, `event`, `list`, `mark`,
/// `unmark`, `delete` or `bye`.
#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// File to store tasks in
    #[arg(short, long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,
    /// Use a custom config file or directory
    #[arg(short, long, value_name = "PATH")]
    pub config_path: Option<PathBuf>,
    /// Optional subcommand to run, starts a session if none is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generates new configuration files from the default ones
    GenerateConfig { path: Option<PathBuf> },
    /// Writes shell completions to STDOUT
    GenerateCompletions { shell: Shell },
}

const VERSION_MESSAGE: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    let author = clap::crate_authors!();

    let config_dir_path = get_config_dir().display().to_string();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["mike", "--data-file", "tasks.txt", "-c", "conf"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("tasks.txt")));
        assert_eq!(cli.config_path, Some(PathBuf::from("conf")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_generate_config() {
        let cli = Cli::parse_from(["mike", "generate-config", "out"]);
        assert!(matches!(
            cli.command,
            Some(Commands::GenerateConfig { path: Some(_) })
        ));
    }
}
