use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Eval,
    Filter,
    History,
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    /// Bad character at a byte offset of the expression
    pub fn lex(ch: char, position: usize, reason: &str) -> Self {
        Error::new(
            ErrorKind::Lex,
            format!("{} {:?} at position {}", reason, ch, position),
        )
    }

    /// `expected` and `found` are token kind names such as `IDENT` or `STRING`
    pub fn parse(expected: &str, found: &str, detail: Option<&str>, position: usize) -> Self {
        let context = match detail {
            Some(text) => format!("Expected {}, got {} ({}) at position {}", expected, found, text, position),
            None => format!("Expected {}, got {} at position {}", expected, found, position),
        };
        Error::new(ErrorKind::Parse, context)
    }

    pub fn eval(context: String) -> Self {
        Error::new(ErrorKind::Eval, context)
    }

    pub fn filter(context: String) -> Self {
        Error::new(ErrorKind::Filter, context)
    }

    pub fn history(context: &str) -> Self {
        Error::new(ErrorKind::History, context.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::InvalidArgument,
            context: format!("invalid event data: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
