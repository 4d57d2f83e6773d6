//! Application context.
//!
//! [`App`] owns everything a session mutates: the display configuration,
//! the text buffer and the paginator. Commands are applied to it one at a
//! time; nothing lives in process-wide state.

use std::ops::Range;

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::command::{Command, CommandError, Setting};
use crate::config::{LayoutMode, PagerConfig};
use crate::error::{PagerError, Result};
use crate::pipeline::{Paginator, ResizeFlag, SessionEnd, Terminal, Viewport};

/// What executing a command produced, for the shell to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A one-line status message.
    Message(String),
    /// A paging session ran to completion.
    Paged(SessionEnd),
    /// The shell should exit.
    Quit,
}

pub struct App {
    config: PagerConfig,
    buffer: TextBuffer,
    paginator: Paginator,
}

impl App {
    pub fn new(config: PagerConfig, buffer: TextBuffer) -> Self {
        Self {
            config,
            buffer,
            paginator: Paginator::new(Viewport::default()),
        }
    }

    #[inline]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Page lines `start..=end` (1-based, both optional) of the buffer.
    ///
    /// `start` defaults to the first line and `end` to the last; `end` is
    /// clamped to the buffer.
    pub fn page<T: Terminal>(
        &mut self,
        start: Option<usize>,
        end: Option<usize>,
        terminal: &mut T,
        resize: &ResizeFlag,
    ) -> Result<SessionEnd> {
        let range = self.page_range(start, end)?;
        debug!(?range, "paging");
        self.paginator
            .run(&self.buffer, &self.config, range, terminal, resize)
    }

    fn page_range(&self, start: Option<usize>, end: Option<usize>) -> Result<Range<usize>> {
        let len = self.buffer.len();
        let start = start.unwrap_or(1).max(1);
        let end = end.unwrap_or(len).min(len);
        if start > len.max(1) {
            return Err(PagerError::out_of_bounds("line", start, 1, len));
        }
        if start > end && len > 0 {
            return Err(PagerError::InvalidArgument(format!(
                "range {start}..{end} is empty"
            )));
        }
        Ok(start - 1..end)
    }

    /// Apply one parsed command.
    pub fn execute<T: Terminal>(
        &mut self,
        command: Command,
        terminal: &mut T,
        resize: &ResizeFlag,
    ) -> std::result::Result<Outcome, CommandError> {
        let outcome = match command {
            Command::Open(path) => {
                self.buffer.open(&path)?;
                self.paginator.invalidate_width();
                Outcome::Message(format!(
                    "{}: {} lines",
                    path.display(),
                    self.buffer.len()
                ))
            }
            Command::Save(None) => {
                self.buffer.save()?;
                Outcome::Message(self.saved_message())
            }
            Command::Save(Some(path)) => {
                self.buffer.save_as(path)?;
                Outcome::Message(self.saved_message())
            }
            Command::Page { start, end } => Outcome::Paged(self.page(start, end, terminal, resize)?),
            Command::Insert { after, text } => {
                let count = self.buffer.insert_after(text.as_bytes(), after)?;
                self.edited(format!("{count} lines inserted"))
            }
            Command::Delete { start, end } => {
                let count = self.buffer.delete_range(start, end)?;
                self.edited(format!("{count} lines deleted"))
            }
            Command::Edit { line, pos, byte } => {
                self.buffer.edit_char(line, pos, byte)?;
                self.edited(format!("line {line} edited"))
            }
            Command::InsertChar { line, pos, byte } => {
                self.buffer.insert_char(line, pos, byte)?;
                self.edited(format!("line {line} edited"))
            }
            Command::Replace {
                start,
                end,
                find,
                replace,
            } => {
                let count =
                    self.buffer
                        .replace_substring(start, end, find.as_bytes(), replace.as_bytes())?;
                self.edited(format!("{count} lines changed"))
            }
            Command::Set(setting) => {
                self.apply_setting(setting)?;
                Outcome::Message(self.settings_summary())
            }
            Command::Info => Outcome::Message(self.info()),
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    fn apply_setting(&mut self, setting: Setting) -> Result<()> {
        match setting {
            Setting::Wrap(on) => self.config.set_wrap(on),
            Setting::Numbers(on) => self.config.set_numbers(on),
            Setting::TabWidth(width) => self.config.set_tab_width(width)?,
        }
        // Gutter and tab width both change the measured line widths
        self.paginator.invalidate_width();
        Ok(())
    }

    fn edited(&mut self, message: String) -> Outcome {
        self.paginator.invalidate_width();
        Outcome::Message(message)
    }

    fn saved_message(&self) -> String {
        match self.buffer.file_name() {
            Some(path) => format!("saved {}", path.display()),
            None => "saved".to_string(),
        }
    }

    fn settings_summary(&self) -> String {
        let on_off = |on: bool| if on { "on" } else { "off" };
        format!(
            "wrap {}, numbers {}, tabwidth {}",
            on_off(self.config.layout_mode() == LayoutMode::Wrap),
            on_off(self.config.line_numbers()),
            self.config.tab_width()
        )
    }

    fn info(&self) -> String {
        let name = self
            .buffer
            .file_name()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[no file]".to_string());
        let modified = if self.buffer.is_modified() { " [modified]" } else { "" };
        format!(
            "{name}: {} lines{modified}; {}",
            self.buffer.len(),
            self.settings_summary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Line;
    use crate::command::tokenize;
    use std::io;

    /// Terminal that must never be touched by non-paging commands.
    struct NoTerminal;

    impl io::Write for NoTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            panic!("unexpected terminal write");
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Terminal for NoTerminal {
        fn query_dimensions(&mut self) -> io::Result<(u16, u16)> {
            panic!("unexpected size query");
        }
        fn enter_interactive_mode(&mut self) -> io::Result<()> {
            panic!("unexpected mode switch");
        }
        fn restore_mode(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn read_key(&mut self) -> io::Result<Option<u8>> {
            Err(io::ErrorKind::UnexpectedEof.into())
        }
    }

    fn app(lines: &[&str]) -> App {
        let lines = lines.iter().map(|&l| Line::from(l)).collect();
        App::new(PagerConfig::default(), TextBuffer::from_lines(lines))
    }

    fn run(app: &mut App, line: &str) -> std::result::Result<Outcome, CommandError> {
        let command = Command::parse(&tokenize(line).unwrap())?.unwrap();
        app.execute(command, &mut NoTerminal, &ResizeFlag::new())
    }

    fn contents(app: &App) -> Vec<String> {
        app.buffer()
            .lines()
            .iter()
            .map(|l| String::from_utf8_lossy(l.as_bytes()).into_owned())
            .collect()
    }

    #[test]
    fn test_edit_commands() {
        let mut app = app(&["abc", "defgh"]);
        run(&mut app, "delete 1").unwrap();
        run(&mut app, r#"insert 0 "x\ny""#).unwrap();
        assert_eq!(contents(&app), vec!["x", "y", "defgh"]);

        run(&mut app, "insertc 1 0 Z").unwrap();
        run(&mut app, "replace 3 3 fg FG").unwrap();
        assert_eq!(contents(&app), vec!["Zx", "y", "deFGh"]);
        assert!(app.buffer().is_modified());
    }

    #[test]
    fn test_failed_edit_leaves_buffer() {
        let mut app = app(&["ab"]);
        let err = run(&mut app, "insert 5 x").unwrap_err();
        assert!(matches!(err, CommandError::Pager(PagerError::OutOfBounds { .. })));
        assert!(err.is_recoverable());
        assert_eq!(contents(&app), vec!["ab"]);
        assert!(!app.buffer().is_modified());
    }

    #[test]
    fn test_save_without_name() {
        let mut app = app(&["ab"]);
        let err = run(&mut app, "save").unwrap_err();
        assert!(matches!(err, CommandError::Pager(PagerError::NoFileName)));
    }

    #[test]
    fn test_set_commands() {
        let mut app = app(&[]);
        let outcome = run(&mut app, "set wrap off").unwrap();
        assert_eq!(
            outcome,
            Outcome::Message("wrap off, numbers off, tabwidth 4".to_string())
        );
        run(&mut app, "set numbers on").unwrap();
        run(&mut app, "set tabwidth 8").unwrap();
        assert!(app.config().line_numbers());
        assert_eq!(app.config().tab_width(), 8);
        assert!(run(&mut app, "set tabwidth 0").is_err());
        assert_eq!(app.config().tab_width(), 8);
    }

    #[test]
    fn test_info_and_quit() {
        let mut app = app(&["a", "b"]);
        let Outcome::Message(info) = run(&mut app, "info").unwrap() else {
            panic!("expected message");
        };
        assert!(info.starts_with("[no file]: 2 lines;"));
        assert_eq!(run(&mut app, "quit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_page_range_conversion() {
        let app = app(&["a", "b", "c", "d"]);
        assert_eq!(app.page_range(None, None).unwrap(), 0..4);
        assert_eq!(app.page_range(Some(2), Some(3)).unwrap(), 1..3);
        assert_eq!(app.page_range(Some(3), Some(99)).unwrap(), 2..4);
        assert!(app.page_range(Some(5), None).is_err());
        assert!(app.page_range(Some(3), Some(2)).is_err());
    }
}
