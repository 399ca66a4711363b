pub mod command_parser;
pub mod token;
pub mod tokenizer;

use color_eyre::Result;

use crate::command::Command;
use command_parser::CommandParser;
use tokenizer::tokenize;

/// Tokenizes and parses a single input line.
///
/// # Errors
///
/// Will return an error with a user facing message if the line is not a valid command.
pub fn parse_command(line: &str) -> Result<Command> {
    CommandParser::new(tokenize(line)).parse()
}
