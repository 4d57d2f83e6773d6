//! Command-line tokenizer.
//!
//! Grammar:
//! - whitespace separates tokens
//! - `"` toggles a protected token that may contain whitespace
//! - `"""` toggles a raw block that may also span input lines
//! - `\n` `\t` `\r` `\\` escape; `\X` is a literal `X`
//! - `#` outside quotes ends the statement
//!
//! Input arrives one line at a time, so a raw block left open at the end
//! of a line makes [`Tokenizer::feed`] ask for more.

use crate::error::{PagerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Quote {
    #[default]
    None,
    Protected,
    RawBlock,
}

/// Incremental tokenizer, fed line by line.
#[derive(Debug, Default)]
pub struct Tokenizer {
    tokens: Vec<String>,
    current: String,
    in_token: bool,
    quote: Quote,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a raw block is open and more input is expected.
    pub fn is_pending(&self) -> bool {
        self.quote == Quote::RawBlock
    }

    /// Tokenize one input line (without its terminator).
    ///
    /// Returns `Ok(None)` when a raw block continues onto the next line,
    /// otherwise the finished statement's tokens.
    pub fn feed(&mut self, line: &str) -> Result<Option<Vec<String>>> {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '\\' => {
                    i += 1;
                    let escaped = match chars.get(i) {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(&other) => other,
                        None => '\\',
                    };
                    self.current.push(escaped);
                    self.in_token = true;
                }
                '"' if self.quote != Quote::Protected && is_triple_quote(&chars, i) => {
                    self.quote = match self.quote {
                        Quote::RawBlock => Quote::None,
                        _ => Quote::RawBlock,
                    };
                    self.in_token = true;
                    i += 3;
                    continue;
                }
                '"' if self.quote != Quote::RawBlock => {
                    self.quote = match self.quote {
                        Quote::Protected => Quote::None,
                        _ => Quote::Protected,
                    };
                    self.in_token = true;
                }
                '#' if self.quote == Quote::None => break,
                c if c.is_whitespace() && self.quote == Quote::None => self.end_token(),
                c => {
                    self.current.push(c);
                    self.in_token = true;
                }
            }
            i += 1;
        }

        match self.quote {
            Quote::Protected => {
                self.reset();
                Err(PagerError::Format("unterminated quote".to_string()))
            }
            Quote::RawBlock => {
                self.current.push('\n');
                Ok(None)
            }
            Quote::None => {
                self.end_token();
                Ok(Some(std::mem::take(&mut self.tokens)))
            }
        }
    }

    /// Signal end of input. Fails if a raw block is still open.
    pub fn finish(&mut self) -> Result<()> {
        if self.quote == Quote::RawBlock {
            self.reset();
            return Err(PagerError::Format("unterminated raw block".to_string()));
        }
        Ok(())
    }

    fn end_token(&mut self) {
        if self.in_token {
            self.tokens.push(std::mem::take(&mut self.current));
            self.in_token = false;
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_triple_quote(chars: &[char], i: usize) -> bool {
    chars.get(i + 1) == Some(&'"') && chars.get(i + 2) == Some(&'"')
}

/// Tokenize a single self-contained line.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokenizer = Tokenizer::new();
    match tokenizer.feed(line)? {
        Some(tokens) => Ok(tokens),
        None => {
            tokenizer.finish()?;
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line).unwrap()
    }

    #[test]
    fn test_whitespace_split() {
        assert_eq!(toks("  delete 1   3 "), vec!["delete", "1", "3"]);
        assert!(toks("").is_empty());
    }

    #[test]
    fn test_protected_token() {
        assert_eq!(toks(r#"insert 0 "hello world""#), vec!["insert", "0", "hello world"]);
        assert_eq!(toks(r#"a"b c"d"#), vec!["ab cd"]);
    }

    #[test]
    fn test_empty_quoted_token_is_kept() {
        assert_eq!(toks(r#"replace 1 2 x """#), vec!["replace", "1", "2", "x", ""]);
        assert_eq!(toks(r#"set "" x"#), vec!["set", "", "x"]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(toks(r"a\nb \t c\\d \q"), vec!["a\nb", "\t", "c\\d", "q"]);
        assert_eq!(toks(r"one\ two"), vec!["one two"]);
    }

    #[test]
    fn test_comment_ends_statement() {
        assert_eq!(toks("page 1 5 # the intro"), vec!["page", "1", "5"]);
        assert_eq!(toks(r##"insert 0 "#not a comment""##), vec!["insert", "0", "#not a comment"]);
    }

    #[test]
    fn test_unterminated_quote_is_format_error() {
        let err = tokenize(r#"insert 0 "oops"#).unwrap_err();
        assert!(matches!(err, PagerError::Format(_)));
    }

    #[test]
    fn test_raw_block_spans_lines() {
        let mut t = Tokenizer::new();
        assert_eq!(t.feed(r#"insert 0 """first"#).unwrap(), None);
        assert!(t.is_pending());
        assert_eq!(t.feed(r#"second "quoted" # kept"#).unwrap(), None);
        let tokens = t.feed(r#"third""" tail"#).unwrap().unwrap();
        assert_eq!(
            tokens,
            vec!["insert", "0", "first\nsecond \"quoted\" # kept\nthird", "tail"]
        );
        assert!(!t.is_pending());
    }

    #[test]
    fn test_unterminated_raw_block_at_end_of_input() {
        let mut t = Tokenizer::new();
        assert_eq!(t.feed(r#"insert 0 """abc"#).unwrap(), None);
        assert!(matches!(t.finish(), Err(PagerError::Format(_))));
        assert!(tokenize(r#""""abc"#).is_err());
    }
}
