use tracing::trace;
use winnow::{
    Parser, Result,
    combinator::{alt, not, peek, preceded, repeat},
    token::{one_of, take_till, take_while},
};

use super::token::{Token, TokenKind};

/// Splits a raw input line into `Token`s.
///
/// Tokenizing never fails: unknown words are kept as `Literal`s so the parser can report
/// them with their original text. The returned vector always ends with a single
/// `EndOfCommand` token.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut input = line.trim_start();
    let mut tokens = vec![];

    if let Ok(token) = command_word.parse_next(&mut input) {
        tokens.push(token);
    }

    while !input.is_empty() {
        match alt((parameter, literal.map(|t| vec![t]), blank)).parse_next(&mut input) {
            Ok(mut next) => tokens.append(&mut next),
            Err(_) => {
                tokens.push(Token::new(TokenKind::Literal, input));
                break;
            }
        }
    }
    tokens.push(Token::end_of_command());

    trace!("Tokenized {line:?} into {tokens:?}");
    tokens
}

/// First word of the line, either a command keyword or a `Literal`.
fn command_word(input: &mut &str) -> Result<Token> {
    preceded(not(marker), take_till(1.., char::is_whitespace))
        .map(|word: &str| match TokenKind::keyword(word) {
            Some(kind) => Token::new(kind, word),
            None => Token::new(TokenKind::Literal, word),
        })
        .parse_next(input)
}

/// A `/` or `-` opening a word and directly followed by a letter.
fn marker(input: &mut &str) -> Result<char> {
    (one_of(['/', '-']), peek(one_of(|c: char| c.is_alphabetic())))
        .map(|(dash, _)| dash)
        .parse_next(input)
}

/// `/by` becomes a `ForwardDash` followed by a `Param`.
fn parameter(input: &mut &str) -> Result<Vec<Token>> {
    (
        marker,
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .map(|(dash, name): (char, &str)| {
            vec![
                Token::new(TokenKind::ForwardDash, dash.to_string()),
                Token::new(TokenKind::Param, name),
            ]
        })
        .parse_next(input)
}

/// Free text up to the next marker, surrounding whitespace included.
fn literal(input: &mut &str) -> Result<Token> {
    (repeat::<_, _, (), _, _>(1.., word), whitespace)
        .take()
        .map(|text: &str| Token::new(TokenKind::Literal, text))
        .parse_next(input)
}

fn word<'s>(input: &mut &'s str) -> Result<&'s str> {
    (whitespace, not(marker), take_till(1.., char::is_whitespace))
        .take()
        .parse_next(input)
}

fn whitespace<'s>(input: &mut &'s str) -> Result<&'s str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

/// Whitespace between two markers carries no text worth keeping.
fn blank(input: &mut &str) -> Result<Vec<Token>> {
    take_while(1.., char::is_whitespace)
        .map(|_| vec![])
        .parse_next(input)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::tokenize;
    use crate::parser::token::{Token, TokenKind};

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_tokenize_empty_line() {
        assert_eq!(tokenize(""), vec![Token::end_of_command()]);
        assert_eq!(tokenize("   \t "), vec![Token::end_of_command()]);
    }

    #[test]
    fn test_tokenize_keywords() {
        let expected = [
            ("bye", TokenKind::Exit),
            ("list", TokenKind::List),
            ("mark", TokenKind::Mark),
            ("unmark", TokenKind::Unmark),
            ("todo", TokenKind::Todo),
            ("deadline", TokenKind::Deadline),
            ("event", TokenKind::Event),
            ("delete", TokenKind::Delete),
        ];
        for (input, kind) in expected {
            assert_eq!(
                tokenize(input),
                vec![Token::new(kind, input), Token::end_of_command()]
            );
        }
    }

    #[test]
    fn test_tokenize_keywords_are_case_sensitive() {
        assert_eq!(
            tokenize("Bye"),
            vec![
                Token::new(TokenKind::Literal, "Bye"),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_unknown_command_keeps_word() {
        assert_eq!(
            tokenize("  blah something else"),
            vec![
                Token::new(TokenKind::Literal, "blah"),
                Token::new(TokenKind::Literal, " something else"),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_todo_keeps_whitespace() {
        assert_eq!(
            tokenize("todo  read book  "),
            vec![
                Token::new(TokenKind::Todo, "todo"),
                Token::new(TokenKind::Literal, "  read book  "),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_deadline() {
        assert_eq!(
            tokenize("deadline submit report /by 2024-10-01"),
            vec![
                Token::new(TokenKind::Deadline, "deadline"),
                Token::new(TokenKind::Literal, " submit report "),
                Token::new(TokenKind::ForwardDash, "/"),
                Token::new(TokenKind::Param, "by"),
                Token::new(TokenKind::Literal, " 2024-10-01"),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_event() {
        let tokens = tokenize("event party /from mon 2pm /to mon 4pm");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Event,
                TokenKind::Literal,
                TokenKind::ForwardDash,
                TokenKind::Param,
                TokenKind::Literal,
                TokenKind::ForwardDash,
                TokenKind::Param,
                TokenKind::Literal,
                TokenKind::EndOfCommand,
            ]
        );
        assert_eq!(tokens[3].text(), "from");
        assert_eq!(tokens[4].text(), " mon 2pm ");
        assert_eq!(tokens[6].text(), "to");
        assert_eq!(tokens[7].text(), " mon 4pm");
    }

    #[test]
    fn test_tokenize_dash_markers() {
        let tokens = tokenize("list -view date -attribute due");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::List, "list"),
                Token::new(TokenKind::ForwardDash, "-"),
                Token::new(TokenKind::Param, "view"),
                Token::new(TokenKind::Literal, " date "),
                Token::new(TokenKind::ForwardDash, "-"),
                Token::new(TokenKind::Param, "attribute"),
                Token::new(TokenKind::Literal, " due"),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_dash_inside_word_is_text() {
        let tokens = tokenize("todo re-read a/b -5 / x");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Todo, "todo"),
                Token::new(TokenKind::Literal, " re-read a/b -5 / x"),
                Token::end_of_command()
            ]
        );
    }

    #[test]
    fn test_tokenize_missing_description() {
        assert_eq!(
            kinds(&tokenize("deadline   /by tomorrow")),
            vec![
                TokenKind::Deadline,
                TokenKind::ForwardDash,
                TokenKind::Param,
                TokenKind::Literal,
                TokenKind::EndOfCommand,
            ]
        );
    }

    #[test]
    fn test_tokenize_line_starting_with_marker() {
        assert_eq!(
            kinds(&tokenize("/by now")),
            vec![
                TokenKind::ForwardDash,
                TokenKind::Param,
                TokenKind::Literal,
                TokenKind::EndOfCommand,
            ]
        );
    }

    #[test]
    fn test_tokenize_always_single_end_of_command() {
        for input in ["", "bye", "todo a /by b /to", "mark 1 2 3", "//by --x"] {
            let tokens = tokenize(input);
            let ends = tokens
                .iter()
                .filter(|t| t.kind() == TokenKind::EndOfCommand)
                .count();
            assert_eq!(ends, 1, "{input:?}");
            assert_eq!(
                tokens.last().map(Token::kind),
                Some(TokenKind::EndOfCommand)
            );
        }
    }
}
