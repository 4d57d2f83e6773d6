//! `linepager` binary: page a file, or drive the command shell.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use linepager::command::run_shell;
use linepager::config::DEFAULT_TAB_WIDTH;
use linepager::{App, DisplayFlags, PagerConfig, ResizeWatcher, TerminalSetup, TextBuffer};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "LINEPAGER_LOG";

#[derive(Debug, Parser)]
#[command(name = "linepager", version, about = "Page and edit text files in the terminal")]
struct Cli {
    /// File to open
    file: Option<PathBuf>,

    /// One screen row per line, scrolled horizontally with < and >
    #[arg(long)]
    no_wrap: bool,

    /// Show line numbers in a left gutter
    #[arg(short, long)]
    numbers: bool,

    /// Columns per tab stop
    #[arg(short, long, default_value_t = DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    /// Write logs to this file (filtered by LINEPAGER_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Read commands from stdin instead of paging the file
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn pager_config(&self) -> linepager::Result<PagerConfig> {
        let mut flags = DisplayFlags::empty();
        flags.set(DisplayFlags::WRAP, !self.no_wrap);
        flags.set(DisplayFlags::LINE_NUMBERS, self.numbers);
        PagerConfig::new(self.tab_width, flags)
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    // The terminal is the UI, so logs only ever go to the file
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_err()
    {
        eprintln!("linepager: logging already initialised");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.pager_config()?;

    let mut buffer = TextBuffer::new();
    if let Some(path) = &cli.file {
        buffer.open(path)?;
    }

    let watcher = ResizeWatcher::install()?;
    let mut terminal = TerminalSetup::new();
    let mut app = App::new(config, buffer);

    if cli.interactive {
        let input = BufReader::new(io::stdin());
        let mut output = io::stdout();
        run_shell(&mut app, input, &mut output, &mut terminal, watcher.flag())?;
    } else if cli.file.is_some() {
        let end = app.page(None, None, &mut terminal, watcher.flag())?;
        info!(?end, "done");
    } else {
        return Err("no file given (use --interactive for the command shell)".into());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("linepager: {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fatal");
            eprintln!("linepager: {err}");
            ExitCode::FAILURE
        }
    }
}
