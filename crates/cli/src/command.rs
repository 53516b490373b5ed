//! REPL command parsing.

use videostore_core::types::DbId;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `a`
    PersonalData,
    /// `l`
    ListPlans,
    /// `p <pid>`
    ChoosePlan(DbId),
    /// `s <title>`
    Search(String),
    /// `fs <title>`
    FastSearch(String),
    /// `r <mid>`
    Rent(DbId),
    /// `ret <mid>`
    Return(DbId),
    /// `q`
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}` expects a numeric id, got `{value}`")]
    InvalidId { command: &'static str, value: String },
}

/// Shown after any input that does not parse.
pub const USAGE: &str = "\
*** Please enter one of the following commands ***
> a
> l
> p <plan id>
> s <movie title>
> fs <movie title>
> r <movie id>
> ret <movie id>
> q";

impl Command {
    /// Parse one input line.
    ///
    /// The verb is the first whitespace-separated word. Search commands take
    /// the rest of the line verbatim (after trimming) as the title, so
    /// titles may contain spaces.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Err(ParseError::Empty),
            "a" => Ok(Self::PersonalData),
            "l" => Ok(Self::ListPlans),
            "q" => Ok(Self::Quit),
            "p" => parse_id("p", "a plan id", rest).map(Self::ChoosePlan),
            "r" => parse_id("r", "a movie id", rest).map(Self::Rent),
            "ret" => parse_id("ret", "a movie id", rest).map(Self::Return),
            "s" => title("s", rest).map(Self::Search),
            "fs" => title("fs", rest).map(Self::FastSearch),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, expected: &'static str, arg: &str) -> Result<DbId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument { command, expected });
    }
    arg.parse().map_err(|_| ParseError::InvalidId {
        command,
        value: arg.to_string(),
    })
}

fn title(command: &'static str, arg: &str) -> Result<String, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            expected: "a movie title",
        });
    }
    Ok(arg.to_string())
}
