mod cli;
mod config;
mod errors;
mod session;

use std::io;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use color_eyre::Result;
use config::Config;
use mike_core::{Storage, init_logging};
use session::{Session, SessionOptions};
use tracing::info;

fn main() -> Result<()> {
    crate::errors::init()?;
    let args = Cli::parse();
    init_logging()?;

    match &args.command {
        Some(Commands::GenerateConfig { path }) => Config::generate_config(path.clone()),
        Some(Commands::GenerateCompletions { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "mike", &mut io::stdout());
            Ok(())
        }
        None => {
            let config = Config::new(&args)?;
            let storage = Storage::new(&config.core.data_file);
            info!("Using task file {}", storage.file_path().display());

            let (mut session, load_error) = Session::open(storage, SessionOptions::from(&config));
            if let Some(message) = load_error {
                eprintln!("{message}");
            }
            session.run(io::stdin().lock(), io::stdout())
        }
    }
}
