use color_eyre::{
    Result,
    eyre::{bail, eyre},
};
use tracing::debug;

use super::token::{Token, TokenKind};
use crate::{command::Command, task_list::ListView};

const NOT_AN_INTEGER: &str = "One, two, three, four, get the kid back through the door!";
const DESCRIPTION_MISSING: &str = "Description missing.";

/// Recursive descent parser turning the tokens of one line into a `Command`.
///
/// The cursor only moves forward and never goes past the final `EndOfCommand` token.
pub struct CommandParser {
    tokens: Vec<Token>,
    current: usize,
}

impl CommandParser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens
            .last()
            .is_none_or(|token| token.kind() != TokenKind::EndOfCommand)
        {
            tokens.push(Token::end_of_command());
        }
        Self { tokens, current: 0 }
    }

    /// Index of the next token to be read.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current
    }

    /// Parses the tokens into a `Command`.
    ///
    /// # Errors
    ///
    /// Will return an error if the line is empty, the command is not recognized or its
    /// arguments don't follow the command's usage. The error message is meant for the user.
    pub fn parse(&mut self) -> Result<Command> {
        if self.check(TokenKind::EndOfCommand) {
            bail!("Say something.");
        }
        let command_token = self.advance().clone();
        let command = match command_token.kind() {
            TokenKind::Exit => self.parse_exit(),
            TokenKind::List => self.parse_list(),
            TokenKind::Mark => self.parse_mark(),
            TokenKind::Unmark => self.parse_unmark(),
            TokenKind::Todo => self.parse_todo(),
            TokenKind::Deadline => self.parse_deadline(),
            TokenKind::Event => self.parse_event(),
            TokenKind::Delete => self.parse_delete(),
            _ => Err(eyre!(
                "'{}' is not recognized as a command.\nThat is the weirdest thing you've ever said.",
                command_token.text()
            )),
        }?;
        debug!("Parsed {command:?}");
        Ok(command)
    }

    fn parse_exit(&mut self) -> Result<Command> {
        self.consume(TokenKind::EndOfCommand, "Usage: bye")?;
        Ok(Command::Exit)
    }

    fn parse_list(&mut self) -> Result<Command> {
        const VIEW_USAGE: &str = "Usage: list /view [type] /attribute [attribute]";

        if !self.match_any(&[TokenKind::ForwardDash]) {
            self.consume(TokenKind::EndOfCommand, "Usage: list")?;
            return Ok(Command::List(ListView::All));
        }

        self.consume_param("view", VIEW_USAGE)?;
        let view_type = self.consume_text(VIEW_USAGE)?;
        if view_type != "date" {
            bail!("Invalid type");
        }

        self.consume(TokenKind::ForwardDash, VIEW_USAGE)?;
        self.consume_param("attribute", VIEW_USAGE)?;
        let attribute = self.consume_text(VIEW_USAGE)?;

        self.consume(TokenKind::EndOfCommand, VIEW_USAGE)?;
        Ok(Command::List(ListView::Date { attribute }))
    }

    fn parse_mark(&mut self) -> Result<Command> {
        let task_number = self.parse_task_number("Usage: mark [number]")?;
        Ok(Command::Mark { task_number })
    }

    fn parse_unmark(&mut self) -> Result<Command> {
        let task_number = self.parse_task_number("Usage: unmark [number]")?;
        Ok(Command::Unmark { task_number })
    }

    fn parse_delete(&mut self) -> Result<Command> {
        let task_number = self.parse_task_number("Usage: delete [number]")?;
        Ok(Command::Delete { task_number })
    }

    fn parse_todo(&mut self) -> Result<Command> {
        const USAGE: &str = "Usage: todo [description]";

        let description = self.consume_text(&format!("{DESCRIPTION_MISSING}\n{USAGE}"))?;
        self.consume(TokenKind::EndOfCommand, USAGE)?;

        Ok(Command::AddTodo { description })
    }

    fn parse_deadline(&mut self) -> Result<Command> {
        const USAGE: &str = "Usage: deadline [description] /by [date]";

        let description = self.consume_text(&format!("{DESCRIPTION_MISSING}\n{USAGE}"))?;

        self.consume(TokenKind::ForwardDash, USAGE)?;
        self.consume_param("by", USAGE)?;
        let deadline = self.consume_text(USAGE)?;

        self.consume(TokenKind::EndOfCommand, USAGE)?;

        Ok(Command::AddDeadline {
            description,
            deadline,
        })
    }

    fn parse_event(&mut self) -> Result<Command> {
        const USAGE: &str = "Usage: event [description] /from [date] /to [date]";

        let description = self.consume_text(&format!("{DESCRIPTION_MISSING}\n{USAGE}"))?;

        self.consume(TokenKind::ForwardDash, USAGE)?;
        self.consume_param("from", USAGE)?;
        let start_date = self.consume_text(&format!("Start date missing.\n{USAGE}"))?;

        self.consume(TokenKind::ForwardDash, USAGE)?;
        self.consume_param("to", USAGE)?;
        let end_date = self.consume_text(&format!("End date missing.\n{USAGE}"))?;

        self.consume(TokenKind::EndOfCommand, USAGE)?;

        Ok(Command::AddEvent {
            description,
            start_date,
            end_date,
        })
    }

    /// `[number]` argument shared by `mark`, `unmark` and `delete`.
    /// Overflowing numbers are rejected like any other non-integer.
    fn parse_task_number(&mut self, usage: &str) -> Result<i32> {
        let argument = self.consume(TokenKind::Literal, usage)?.text().trim().to_owned();
        self.consume(TokenKind::EndOfCommand, usage)?;

        argument.parse::<i32>().map_err(|_| {
            eyre!("{NOT_AN_INTEGER}\n'{argument}' is not an integer Sulley...")
        })
    }

    /// Consumes a `Literal` and returns its trimmed text, which can't be empty.
    fn consume_text(&mut self, message: &str) -> Result<String> {
        let text = self
            .consume(TokenKind::Literal, message)?
            .text()
            .trim()
            .to_owned();
        if text.is_empty() {
            bail!("{message}");
        }
        Ok(text)
    }

    fn consume_param(&mut self, name: &str, message: &str) -> Result<()> {
        if self.consume(TokenKind::Param, message)?.text() != name {
            bail!("{message}");
        }
        Ok(())
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        debug!(
            "Expected {kind} at {}, found {}",
            self.current,
            self.peek()
        );
        Err(eyre!("{message}"))
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            return true;
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind() == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::EndOfCommand)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }
}
