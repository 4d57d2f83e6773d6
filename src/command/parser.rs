//! Command parsing.
//!
//! Maps a tokenized statement onto a [`Command`]. Line arguments are
//! 1-based, matching what the pager's gutter shows.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::PagerError;

/// Command parsing or execution error.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: unexpected argument '{token}'")]
    TooManyArguments { command: &'static str, token: String },

    #[error(transparent)]
    Pager(#[from] PagerError),
}

impl CommandError {
    /// Anything except terminal failures leaves the shell usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Pager(PagerError::Terminal(_)))
    }
}

/// Runtime display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Wrap(bool),
    Numbers(bool),
    TabWidth(usize),
}

/// A parsed shell statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `open PATH`
    Open(PathBuf),
    /// `save [PATH]`
    Save(Option<PathBuf>),
    /// `page [START [END]]`
    Page {
        start: Option<usize>,
        end: Option<usize>,
    },
    /// `insert AFTER TEXT`
    Insert { after: usize, text: String },
    /// `delete START [END]`
    Delete { start: usize, end: usize },
    /// `edit LINE POS CHAR`
    Edit { line: usize, pos: usize, byte: u8 },
    /// `insertc LINE POS CHAR`
    InsertChar { line: usize, pos: usize, byte: u8 },
    /// `replace START END FIND REPLACE`
    Replace {
        start: usize,
        end: usize,
        find: String,
        replace: String,
    },
    /// `set wrap|numbers on|off`, `set tabwidth N`
    Set(Setting),
    /// `info`
    Info,
    /// `quit`
    Quit,
}

impl Command {
    /// Parse one statement. An empty statement parses to `None`.
    pub fn parse(tokens: &[String]) -> Result<Option<Self>, CommandError> {
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(None);
        };
        let mut args = Args::new(command_name(name)?, rest);

        let command = match args.command {
            "open" => Self::Open(PathBuf::from(args.required("path")?)),
            "save" => Self::Save(args.optional().map(PathBuf::from)),
            "page" => Self::Page {
                start: args.optional_number("start")?,
                end: args.optional_number("end")?,
            },
            "insert" => Self::Insert {
                after: args.number("line")?,
                text: args.required("text")?.to_string(),
            },
            "delete" => {
                let start = args.number("start")?;
                let end = args.optional_number("end")?.unwrap_or(start);
                Self::Delete { start, end }
            }
            "edit" => Self::Edit {
                line: args.number("line")?,
                pos: args.number("position")?,
                byte: args.byte("character")?,
            },
            "insertc" => Self::InsertChar {
                line: args.number("line")?,
                pos: args.number("position")?,
                byte: args.byte("character")?,
            },
            "replace" => Self::Replace {
                start: args.number("start")?,
                end: args.number("end")?,
                find: args.required("search text")?.to_string(),
                replace: args.required("replacement")?.to_string(),
            },
            "set" => Self::Set(parse_setting(&mut args)?),
            "info" => Self::Info,
            "quit" | "q" => Self::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        args.finish()?;
        Ok(Some(command))
    }
}

const COMMANDS: &[&str] = &[
    "open", "save", "page", "insert", "delete", "edit", "insertc", "replace", "set", "info",
    "quit", "q",
];

fn command_name(token: &str) -> Result<&'static str, CommandError> {
    COMMANDS
        .iter()
        .copied()
        .find(|&c| c == token)
        .ok_or_else(|| CommandError::UnknownCommand(token.to_string()))
}

fn parse_setting(args: &mut Args<'_>) -> Result<Setting, CommandError> {
    let name = args.required("setting")?;
    match name {
        "wrap" => Ok(Setting::Wrap(args.switch()?)),
        "numbers" => Ok(Setting::Numbers(args.switch()?)),
        "tabwidth" => Ok(Setting::TabWidth(args.number("width")?)),
        other => Err(PagerError::InvalidArgument(format!("unknown setting '{other}'")).into()),
    }
}

// =============================================================================
// Argument cursor
// =============================================================================

struct Args<'a> {
    command: &'static str,
    rest: std::slice::Iter<'a, String>,
}

impl<'a> Args<'a> {
    fn new(command: &'static str, rest: &'a [String]) -> Self {
        Self {
            command,
            rest: rest.iter(),
        }
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.rest.next().map(String::as_str)
    }

    fn required(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.optional().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<usize, CommandError> {
        let token = self.required(argument)?;
        parse_number(argument, token)
    }

    fn optional_number(&mut self, argument: &'static str) -> Result<Option<usize>, CommandError> {
        self.optional().map(|t| parse_number(argument, t)).transpose()
    }

    fn byte(&mut self, argument: &'static str) -> Result<u8, CommandError> {
        match self.required(argument)?.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(PagerError::InvalidArgument(format!("{argument} must be a single byte")).into()),
        }
    }

    fn switch(&mut self) -> Result<bool, CommandError> {
        match self.required("on|off")? {
            "on" => Ok(true),
            "off" => Ok(false),
            other => Err(PagerError::InvalidArgument(format!("expected on or off, got '{other}'")).into()),
        }
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.rest.next() {
            Some(token) => Err(CommandError::TooManyArguments {
                command: self.command,
                token: token.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn parse_number(argument: &str, token: &str) -> Result<usize, CommandError> {
    token
        .parse()
        .map_err(|_| PagerError::InvalidArgument(format!("{argument}: '{token}' is not a number")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::tokenize;
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        Command::parse(&tokenize(line).unwrap())
    }

    #[test]
    fn test_empty_statement() {
        assert_eq!(parse("   # nothing").unwrap(), None);
    }

    #[test]
    fn test_parse_edits() {
        assert_eq!(
            parse(r#"insert 0 "x\ny""#).unwrap(),
            Some(Command::Insert { after: 0, text: "x\ny".to_string() })
        );
        assert_eq!(
            parse("delete 4").unwrap(),
            Some(Command::Delete { start: 4, end: 4 })
        );
        assert_eq!(
            parse(r"edit 2 3 \t").unwrap(),
            Some(Command::Edit { line: 2, pos: 3, byte: b'\t' })
        );
        assert_eq!(
            parse("insertc 1 0 Z").unwrap(),
            Some(Command::InsertChar { line: 1, pos: 0, byte: b'Z' })
        );
        assert_eq!(
            parse(r#"replace 1 1 bc "X Z""#).unwrap(),
            Some(Command::Replace {
                start: 1,
                end: 1,
                find: "bc".to_string(),
                replace: "X Z".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_page_and_files() {
        assert_eq!(
            parse("page").unwrap(),
            Some(Command::Page { start: None, end: None })
        );
        assert_eq!(
            parse("page 10 20").unwrap(),
            Some(Command::Page { start: Some(10), end: Some(20) })
        );
        assert_eq!(parse("save").unwrap(), Some(Command::Save(None)));
        assert_eq!(
            parse("open notes.txt").unwrap(),
            Some(Command::Open(PathBuf::from("notes.txt")))
        );
    }

    #[test]
    fn test_parse_settings() {
        assert_eq!(parse("set wrap off").unwrap(), Some(Command::Set(Setting::Wrap(false))));
        assert_eq!(parse("set numbers on").unwrap(), Some(Command::Set(Setting::Numbers(true))));
        assert_eq!(parse("set tabwidth 8").unwrap(), Some(Command::Set(Setting::TabWidth(8))));
        assert!(parse("set wrap maybe").is_err());
        assert!(parse("set colour red").is_err());
    }

    #[test]
    fn test_malformed_number() {
        let err = parse("delete one").unwrap_err();
        assert!(matches!(err, CommandError::Pager(PagerError::InvalidArgument(_))));
        assert!(parse("delete -1").is_err());
    }

    #[test]
    fn test_argument_count_errors() {
        assert!(matches!(
            parse("edit 1 2").unwrap_err(),
            CommandError::MissingArgument { argument: "character", .. }
        ));
        assert!(matches!(
            parse("quit now").unwrap_err(),
            CommandError::TooManyArguments { .. }
        ));
        assert!(parse("edit 1 2 ab").is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            parse("frobnicate").unwrap_err(),
            CommandError::UnknownCommand(name) if name == "frobnicate"
        ));
    }
}
