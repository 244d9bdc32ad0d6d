use parse_display::{Display, FromStr};

use crate::{CatalogEntry, Item};


/// A user interaction against a [`Session`](crate::Session).
///
/// Positions are 1-based, as shown in the rendered lists.
#[derive(Display, FromStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    #[display("add {0}")]
    Add(usize),
    #[display("remove {0}")]
    Remove(usize),
    #[display("show")]
    Show,
    #[display("json")]
    Json,
    #[display("help")]
    Help,
    #[display("quit")]
    Quit,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some).map_err(|_| ParseCommandError {
        line: line.to_string(),
    })
}

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    #[display("added {0}")]
    Added(CatalogEntry),
    #[display("removed {0}")]
    Removed(Item),
    #[display("{0}")]
    Render(String),
    #[display("{0}")]
    Json(String),
    #[display("commands: add <n>, remove <n>, show, json, help, quit")]
    Help,
    #[display("bye")]
    Quit,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[display(style = "lowercase")]
pub enum View {
    Catalog,
    Cart,
}

#[non_exhaustive]
#[derive(Display, Debug, Clone, PartialEq, Eq)]
#[display("unknown command `{line}`, try `help`")]
pub struct ParseCommandError {
    pub line: String,
}

impl std::error::Error for ParseCommandError {}

#[derive(Display, Debug)]
pub enum CommandError {
    #[display("no {view} entry at position {position}")]
    UnknownPosition { view: View, position: usize },
    #[display("failed to serialize the cart: {0}")]
    Json(serde_json::Error),
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::UnknownPosition { .. } => None,
            CommandError::Json(e) => Some(e),
        }
    }
}
impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Json(e)
    }
}
