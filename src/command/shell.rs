//! Read-eval loop over a line-oriented input stream.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use super::parser::{Command, CommandError};
use super::tokenizer::Tokenizer;
use crate::app::{App, Outcome};
use crate::error::PagerError;
use crate::pipeline::{ResizeFlag, Terminal};

const PROMPT: &str = "linepager> ";
const CONTINUATION_PROMPT: &str = "... ";

/// Run commands from `input` until `quit` or end of input.
///
/// Command errors are reported on `output` and the shell carries on;
/// only terminal failures end it early.
pub fn run_shell<R, W, T>(
    app: &mut App,
    input: R,
    output: &mut W,
    terminal: &mut T,
    resize: &ResizeFlag,
) -> Result<(), CommandError>
where
    R: BufRead,
    W: Write,
    T: Terminal,
{
    let mut tokenizer = Tokenizer::new();
    let mut lines = input.lines();

    loop {
        let prompt = if tokenizer.is_pending() { CONTINUATION_PROMPT } else { PROMPT };
        write!(output, "{prompt}").map_err(PagerError::Terminal)?;
        output.flush().map_err(PagerError::Terminal)?;

        let Some(line) = lines.next() else {
            writeln!(output).map_err(PagerError::Terminal)?;
            if let Err(err) = tokenizer.finish() {
                report(output, &err.into())?;
            }
            return Ok(());
        };
        let line = line.map_err(PagerError::Terminal)?;

        let tokens = match tokenizer.feed(&line) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => continue,
            Err(err) => {
                report(output, &err.into())?;
                continue;
            }
        };

        let result = Command::parse(&tokens).and_then(|command| match command {
            Some(command) => {
                debug!(?command, "executing");
                app.execute(command, terminal, resize).map(Some)
            }
            None => Ok(None),
        });

        match result {
            Ok(Some(Outcome::Quit)) => return Ok(()),
            Ok(Some(Outcome::Message(message))) => {
                writeln!(output, "{message}").map_err(PagerError::Terminal)?;
            }
            Ok(Some(Outcome::Paged(end))) => debug!(?end, "paging finished"),
            Ok(None) => {}
            Err(err) if err.is_recoverable() => report(output, &err)?,
            Err(err) => return Err(err),
        }
    }
}

fn report<W: Write>(output: &mut W, err: &CommandError) -> Result<(), CommandError> {
    warn!(%err, "command failed");
    writeln!(output, "error: {err}").map_err(PagerError::Terminal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Line, TextBuffer};
    use crate::config::PagerConfig;
    use std::io;

    struct Unused;

    impl io::Write for Unused {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Terminal for Unused {
        fn query_dimensions(&mut self) -> io::Result<(u16, u16)> {
            Ok((5, 20))
        }
        fn enter_interactive_mode(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn restore_mode(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn read_key(&mut self) -> io::Result<Option<u8>> {
            Err(io::ErrorKind::UnexpectedEof.into())
        }
    }

    fn shell(lines: &[&str], script: &str) -> (App, String) {
        let lines = lines.iter().map(|&l| Line::from(l)).collect();
        let mut app = App::new(PagerConfig::default(), TextBuffer::from_lines(lines));
        let mut output = Vec::new();
        run_shell(
            &mut app,
            script.as_bytes(),
            &mut output,
            &mut Unused,
            &ResizeFlag::new(),
        )
        .unwrap();
        (app, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_runs_until_quit() {
        let (app, output) = shell(&["abc"], "insertc 1 0 Z\nquit\ndelete 1\n");
        assert_eq!(app.buffer().line(0).unwrap().as_bytes(), b"Zabc");
        assert!(output.contains("line 1 edited"));
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() {
        let (app, output) = shell(&["abc"], "bogus\ndelete x\ninsert 1 tail\n");
        assert!(output.contains("error: unknown command: bogus"));
        assert!(output.contains("error: invalid argument"));
        assert_eq!(app.buffer().len(), 2);
    }

    #[test]
    fn test_raw_block_continuation_prompt() {
        let (app, output) = shell(&[], "insert 0 \"\"\"one\ntwo\"\"\"\n");
        assert!(output.contains(CONTINUATION_PROMPT));
        // Empty buffer has no lines, so the two new lines are everything
        assert_eq!(app.buffer().len(), 2);
    }

    #[test]
    fn test_unterminated_block_reported_at_end() {
        let (_, output) = shell(&[], "insert 0 \"\"\"open\n");
        assert!(output.contains("error: format error: unterminated raw block"));
    }
}
