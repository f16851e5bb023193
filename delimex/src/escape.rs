//! Delimiter escaping for raw regex bodies
//!
//! A raw regex (read from a config file, a database column, or typed in by a
//! user) has to be wrapped in delimiters before it can be used as a pattern
//! literal. Any bare delimiter inside the body must be escaped, but an
//! already-escaped delimiter must be left alone, and a trailing backslash must
//! be escaped so it does not swallow the closing delimiter.

/// The delimiter used when wrapping a raw regex
pub const DELIMITER: char = '/';

/// Wrap a raw regex in delimiters and append `modifiers` verbatim
///
/// # Example
/// ```
/// use delimex::regex_to_pattern;
///
/// assert_eq!(regex_to_pattern("^http://([^/:]+)", "i"), r"/^http:\/\/([^\/:]+)/i");
/// assert_eq!(regex_to_pattern(r"\/", ""), r"/\//");
/// assert_eq!(regex_to_pattern(r"a\", ""), r"/a\\/");
/// ```
pub fn regex_to_pattern(regex: &str, modifiers: &str) -> String {
    let cooked = if needs_scan(regex) {
        tracing::trace!(regex, "escaping delimiters with the scanner");
        escape_scanned(regex)
    } else {
        escape_blind(regex)
    };

    let mut pattern = String::with_capacity(cooked.len() + modifiers.len() + 2);
    pattern.push(DELIMITER);
    pattern.push_str(&cooked);
    pattern.push(DELIMITER);
    pattern.push_str(modifiers);
    pattern
}

/// Whether the body holds an escaped delimiter or ends in a backslash
///
/// Without either, every delimiter in the body is bare and can be escaped
/// with a plain substitution.
fn needs_scan(regex: &str) -> bool {
    regex.ends_with('\\') || regex.contains("\\/")
}

fn escape_blind(regex: &str) -> String {
    regex.replace(DELIMITER, "\\/")
}

fn escape_scanned(regex: &str) -> String {
    let mut cooked = String::with_capacity(regex.len() + 2);
    for piece in Pieces::new(regex) {
        match piece {
            Piece::Run(run) => cooked.push_str(run),
            Piece::Delimiter => {
                cooked.push('\\');
                cooked.push(DELIMITER);
            }
            Piece::TrailingEscape => cooked.push_str("\\\\"),
        }
    }
    cooked
}

/// A section of a raw regex body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    /// Ordinary characters and escape pairs, copied through unchanged
    Run(&'a str),
    /// A bare delimiter
    Delimiter,
    /// A lone backslash at the very end of the body
    TrailingEscape,
}

/// Splits a regex body into [`Piece`]s in a single left-to-right pass
struct Pieces<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Pieces<'a> {
    fn new(input: &'a str) -> Self {
        Pieces { input, position: 0 }
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        let rest = &self.input[self.position..];
        let len = ordinary_len(rest);
        if len > 0 {
            self.position += len;
            return Some(Piece::Run(&rest[..len]));
        }

        // Only a bare delimiter or a dangling backslash can stop a run at its start
        let c = rest.chars().next()?;
        self.position += c.len_utf8();
        if c == DELIMITER {
            Some(Piece::Delimiter)
        } else {
            Some(Piece::TrailingEscape)
        }
    }
}

/// Byte length of the longest prefix made of ordinary characters and escape pairs
fn ordinary_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    let mut end = 0;
    while let Some((i, c)) = chars.next() {
        match c {
            DELIMITER => break,
            '\\' => match chars.next() {
                Some((j, escaped)) => end = j + escaped.len_utf8(),
                None => break,
            },
            _ => end = i + c.len_utf8(),
        }
    }
    end
}
