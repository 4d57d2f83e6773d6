//! Scripted terminal for driving paging sessions in tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Write};

use linepager::{Line, ResizeFlag, Terminal, TextBuffer};

/// One scripted input event.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// A key press.
    Key(u8),
    /// A read that timed out without input.
    Idle,
    /// The terminal is resized to `rows` x `cols`; the resize flag is raised.
    Resize(u16, u16),
}

/// In-memory [`Terminal`]: replays a key script and records every flush
/// as one frame.
pub struct FakeTerminal {
    rows: u16,
    cols: u16,
    script: VecDeque<Step>,
    resize: ResizeFlag,
    pending: Vec<u8>,
    pub frames: Vec<Vec<u8>>,
    pub entered: usize,
    pub restored: usize,
    pub fail_size_query: bool,
}

impl FakeTerminal {
    pub fn new(rows: u16, cols: u16, script: &[Step]) -> Self {
        Self {
            rows,
            cols,
            script: script.iter().copied().collect(),
            resize: ResizeFlag::new(),
            pending: Vec::new(),
            frames: Vec::new(),
            entered: 0,
            restored: 0,
            fail_size_query: false,
        }
    }

    /// The flag the session should poll.
    pub fn resize_flag(&self) -> ResizeFlag {
        self.resize.clone()
    }

    pub fn frame_text(&self, index: usize) -> String {
        String::from_utf8_lossy(&self.frames[index]).into_owned()
    }

    pub fn last_frame_text(&self) -> String {
        self.frame_text(self.frames.len() - 1)
    }
}

impl Write for FakeTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.frames.push(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}

impl Terminal for FakeTerminal {
    fn query_dimensions(&mut self) -> io::Result<(u16, u16)> {
        if self.fail_size_query {
            return Err(io::Error::other("no tty"));
        }
        Ok((self.rows, self.cols))
    }

    fn enter_interactive_mode(&mut self) -> io::Result<()> {
        self.entered += 1;
        Ok(())
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        self.restored += 1;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Option<u8>> {
        match self.script.pop_front() {
            Some(Step::Key(key)) => Ok(Some(key)),
            Some(Step::Idle) => Ok(None),
            Some(Step::Resize(rows, cols)) => {
                self.rows = rows;
                self.cols = cols;
                self.resize.notify();
                Ok(None)
            }
            None => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }
}

pub fn buffer(lines: &[&str]) -> TextBuffer {
    TextBuffer::from_lines(lines.iter().map(|&s| Line::from(s)).collect())
}

/// `count` lines named `line 1`, `line 2`, ...
pub fn numbered(count: usize) -> TextBuffer {
    TextBuffer::from_lines((1..=count).map(|n| Line::from(format!("line {n}").as_str())).collect())
}
