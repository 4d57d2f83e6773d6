//! Terminal geometry and mode switching.
//!
//! [`Terminal`] is the seam between the paginator and the real tty: size
//! query, raw/normal mode toggle, bounded single-key reads and frame
//! output. [`TerminalSetup`] implements it for stdin/stdout; tests drive
//! the paginator through a scripted implementation instead.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::renderer::ansi;

// =============================================================================
// Viewport
// =============================================================================

/// Cached terminal geometry.
///
/// `rows` is the number of content rows: one terminal row is kept back
/// for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Viewport for a terminal reporting `rows` x `cols`.
    pub fn from_terminal_size(rows: u16, cols: u16) -> Self {
        Self::new(usize::from(rows).saturating_sub(1), usize::from(cols))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_terminal_size(24, 80)
    }
}

// =============================================================================
// Terminal trait
// =============================================================================

/// Everything the paging session needs from a terminal.
///
/// Frames are written through the `Write` supertrait and flushed once.
pub trait Terminal: Write {
    /// Current `(rows, cols)` as reported by the terminal.
    fn query_dimensions(&mut self) -> io::Result<(u16, u16)>;

    /// Switch to unbuffered, non-echoing input with a bounded read timeout.
    fn enter_interactive_mode(&mut self) -> io::Result<()>;

    /// Return to the mode saved by `enter_interactive_mode`.
    fn restore_mode(&mut self) -> io::Result<()>;

    /// Read one key byte. `None` when the read timed out or was interrupted;
    /// `UnexpectedEof` once input is exhausted.
    fn read_key(&mut self) -> io::Result<Option<u8>>;
}

// =============================================================================
// TerminalSetup
// =============================================================================

/// Terminal handle over the process's stdin/stdout.
pub struct TerminalSetup {
    is_raw: bool,
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self {
            is_raw: false,
            #[cfg(unix)]
            original: None,
        }
    }

    /// Size via cursor position report: push the cursor to the far corner
    /// and ask where it ended up.
    fn query_by_cursor_report(&mut self) -> io::Result<(u16, u16)> {
        let was_raw = self.is_raw;
        if !was_raw {
            self.enter_interactive_mode()?;
        }

        let mut out = io::stdout().lock();
        ansi::cursor_far_corner(&mut out)?;
        ansi::request_cursor_position(&mut out)?;
        out.flush()?;
        drop(out);

        let mut report = Vec::with_capacity(32);
        while report.len() < 31 {
            match self.read_key()? {
                Some(b'R') => break,
                Some(byte) => report.push(byte),
                None => break,
            }
        }

        if !was_raw {
            self.restore_mode()?;
        }
        ansi::parse_cursor_report(&report).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "malformed cursor position report")
        })
    }
}

impl Default for TerminalSetup {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if self.is_raw {
            if let Err(err) = self.restore_mode() {
                warn!(%err, "failed to restore terminal mode on drop");
            }
        }
    }
}

impl Write for TerminalSetup {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

impl Terminal for TerminalSetup {
    fn query_dimensions(&mut self) -> io::Result<(u16, u16)> {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 => Ok((rows, cols)),
            Ok(_) => {
                debug!("terminal reported zero columns, using cursor report");
                self.query_by_cursor_report()
            }
            Err(err) => {
                debug!(%err, "terminal size query failed, using cursor report");
                self.query_by_cursor_report()
            }
        }
    }

    #[cfg(unix)]
    fn enter_interactive_mode(&mut self) -> io::Result<()> {
        use crossterm::tty::IsTty;
        use std::os::unix::io::AsRawFd;

        let stdin = io::stdin();
        // Piped input: nothing to switch, reads just hit EOF
        if !stdin.is_tty() {
            return Ok(());
        }
        let fd = stdin.as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            if self.original.is_none() {
                self.original = Some(termios);
            }

            termios.c_iflag &= !(libc::BRKINT | libc::IXON | libc::ICRNL | libc::INPCK | libc::ISTRIP);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
            // Reads return after 100ms even without input
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 1;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        self.is_raw = true;
        Ok(())
    }

    #[cfg(unix)]
    fn restore_mode(&mut self) -> io::Result<()> {
        use std::os::unix::io::AsRawFd;

        if let Some(original) = self.original.as_ref() {
            let fd = io::stdin().as_raw_fd();
            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }
        }
        self.is_raw = false;
        Ok(())
    }

    #[cfg(unix)]
    fn read_key(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            // Without raw mode a zero read is end of input, not a timeout
            Ok(0) if !self.is_raw => Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            // A resize signal interrupts the read; the caller polls the flag
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[cfg(not(unix))]
    fn enter_interactive_mode(&mut self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        self.is_raw = true;
        Ok(())
    }

    #[cfg(not(unix))]
    fn restore_mode(&mut self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        self.is_raw = false;
        Ok(())
    }

    #[cfg(not(unix))]
    fn read_key(&mut self) -> io::Result<Option<u8>> {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind};
        use std::time::Duration;

        if !event::poll(Duration::from_millis(100))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) if c.is_ascii() => Ok(Some(c as u8)),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }
}
