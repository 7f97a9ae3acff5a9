use crate::tracking::SearchParams;
use std::fmt;

const SEARCH_USAGE: &str = "usage: search <target> <lat> <lon>   (e.g. search 499 40.0 -74.0)";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(SearchParams),
    Track,
    Status,
    Catalog(Option<String>),
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(cmd) => {
                write!(f, "unknown command {cmd:?}, type 'help' for a list")
            }
            ParseError::Usage(usage) => write!(f, "{usage}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one console input line. Whitespace-tolerant, keyword
/// case-insensitive. Search requires a non-empty target and numeric
/// latitude/longitude; this is the caller-side precondition of
/// [`crate::tracking::PositionPoller::submit_search`].
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Err(ParseError::Empty);
    };

    match keyword.to_ascii_lowercase().as_str() {
        "search" | "scan" => {
            let (Some(target), Some(lat), Some(lon)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(ParseError::Usage(SEARCH_USAGE));
            };
            if parts.next().is_some() {
                return Err(ParseError::Usage(SEARCH_USAGE));
            }
            let lat: f64 = lat.parse().map_err(|_| ParseError::Usage(SEARCH_USAGE))?;
            let lon: f64 = lon.parse().map_err(|_| ParseError::Usage(SEARCH_USAGE))?;
            Ok(Command::Search(SearchParams { target: String::from(target), lat, lon }))
        }
        "track" => Ok(Command::Track),
        "status" => Ok(Command::Status),
        "catalog" => {
            let term = parts.collect::<Vec<_>>().join(" ");
            Ok(Command::Catalog((!term.is_empty()).then_some(term)))
        }
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        other => Err(ParseError::Unknown(String::from(other))),
    }
}
