//! Interactive command shell.
//!
//! ```text
//! input line → Tokenizer → tokens → Command::parse → App::execute
//! ```

mod parser;
mod shell;
mod tokenizer;

pub use parser::{Command, CommandError, Setting};
pub use shell::run_shell;
pub use tokenizer::{Tokenizer, tokenize};
