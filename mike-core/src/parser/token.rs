use strum_macros::Display;

/// Kind of a `Token`. Keyword kinds are only produced for the first word of a line.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Exit,
    List,
    Mark,
    Unmark,
    Todo,
    Deadline,
    Event,
    Delete,
    ForwardDash,
    Param,
    Literal,
    EndOfCommand,
}

impl TokenKind {
    /// Returns the command kind for a keyword, case-sensitively.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "bye" => Some(Self::Exit),
            "list" => Some(Self::List),
            "mark" => Some(Self::Mark),
            "unmark" => Some(Self::Unmark),
            "todo" => Some(Self::Todo),
            "deadline" => Some(Self::Deadline),
            "event" => Some(Self::Event),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn end_of_command() -> Self {
        Self::new(TokenKind::EndOfCommand, String::new())
    }

    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.text)
    }
}
