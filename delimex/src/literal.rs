//! Splitting delimited pattern literals
//!
//! A pattern literal is a delimiter, the regex body, a closing delimiter and
//! a list of modifier letters, e.g. `/colou?r/i` or `{a{2}b}x`. This module
//! splits a literal into its parts so the body can be handed to the engine
//! with the right options.

use std::borrow::Cow;
use std::fmt;

use crate::error::{PatternError, Result};
use crate::extended::is_space;

/// Modifier flags following the closing delimiter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Case insensitive matching (i)
    pub case_insensitive: bool,
    /// Multiline mode - ^ and $ match line boundaries (m)
    pub multi_line: bool,
    /// Dot matches newline (s)
    pub dot_all: bool,
    /// Extended mode - ignore whitespace, allow # comments (x)
    pub extended: bool,
    /// Swap greedy and lazy quantifiers (U)
    pub ungreedy: bool,
    /// Unicode mode (u); the engine is always Unicode-aware
    pub unicode: bool,
    /// `$` matches only at the very end (D)
    ///
    /// Accepted and ignored. The engine's `$` never matches before a final
    /// newline, so a pattern without `D` behaves as if it were set: `/a$/`
    /// does not match `"a\n"`.
    pub dollar_end_only: bool,
    /// The match must start at the beginning of the subject (A)
    pub anchored: bool,
    /// Extra analysis (S); accepted and ignored
    pub study: bool,
    /// Reject unknown escapes (X); the engine always does
    pub extra: bool,
    /// Allow duplicate group names (J); accepted, the engine still rejects them
    pub dup_names: bool,
}

impl Modifiers {
    /// Parse a modifier list like "imsx"
    ///
    /// Spaces and line breaks are ignored.
    pub fn parse(flags: &str) -> Result<Self> {
        let mut mode = Modifiers::default();
        for c in flags.chars() {
            match c {
                'i' => mode.case_insensitive = true,
                'm' => mode.multi_line = true,
                's' => mode.dot_all = true,
                'x' => mode.extended = true,
                'U' => mode.ungreedy = true,
                'u' => mode.unicode = true,
                'D' => mode.dollar_end_only = true,
                'A' => mode.anchored = true,
                'S' => mode.study = true,
                'X' => mode.extra = true,
                'J' => mode.dup_names = true,
                'n' => return Err(PatternError::UnsupportedModifier(c)),
                ' ' | '\n' | '\r' => {}
                other => return Err(PatternError::UnknownModifier(other)),
            }
        }
        Ok(mode)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.extended, 'x'),
            (self.ungreedy, 'U'),
            (self.unicode, 'u'),
            (self.dollar_end_only, 'D'),
            (self.anchored, 'A'),
            (self.study, 'S'),
            (self.extra, 'X'),
            (self.dup_names, 'J'),
        ];
        for (set, letter) in letters {
            if set {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// A pattern literal split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLiteral<'a> {
    /// The opening delimiter
    pub open: char,
    /// The closing delimiter; differs from `open` for bracket pairs
    pub close: char,
    /// The regex between the delimiters, exactly as written
    pub body: &'a str,
    /// The parsed modifier list
    pub modifiers: Modifiers,
}

impl<'a> PatternLiteral<'a> {
    /// Split a pattern literal
    ///
    /// # Example
    /// ```
    /// use delimex::PatternLiteral;
    ///
    /// let literal = PatternLiteral::parse(r"/a\/b/i").unwrap();
    /// assert_eq!(literal.body, r"a\/b");
    /// assert!(literal.modifiers.case_insensitive);
    /// ```
    pub fn parse(pattern: &'a str) -> Result<Self> {
        let trimmed = pattern.trim_start_matches(is_space);
        let mut chars = trimmed.char_indices();

        let open = match chars.next() {
            Some((_, c)) => c,
            None => return Err(PatternError::Empty),
        };
        if open.is_ascii_alphanumeric() || open == '\\' || open == '\0' {
            return Err(PatternError::InvalidDelimiter(open));
        }

        let close = closing_partner(open).unwrap_or(open);
        let body_start = open.len_utf8();
        let mut depth = 1usize;
        let mut body_end = None;

        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                // An escape pair never opens or closes anything
                chars.next();
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    body_end = Some(i);
                    break;
                }
            } else if c == open && close != open {
                depth += 1;
            }
        }

        let body_end = match body_end {
            Some(end) => end,
            None if close != open => return Err(PatternError::NoEndingMatchingDelimiter(close)),
            None => return Err(PatternError::NoEndingDelimiter(open)),
        };

        let modifiers = Modifiers::parse(&trimmed[body_end + close.len_utf8()..])?;
        Ok(PatternLiteral {
            open,
            close,
            body: &trimmed[body_start..body_end],
            modifiers,
        })
    }

    /// The body as it is handed to the engine
    ///
    /// With `<>` delimiters, `\<` and `\>` are escaped delimiters standing
    /// for the characters themselves. The engine reads them as word
    /// boundaries, so they become hex escapes.
    pub fn engine_body(&self) -> Cow<'a, str> {
        if self.open != '<' || !(self.body.contains(r"\<") || self.body.contains(r"\>")) {
            return Cow::Borrowed(self.body);
        }

        let mut out = String::with_capacity(self.body.len() + 4);
        let mut chars = self.body.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('<') => out.push_str(r"\x3C"),
                Some('>') => out.push_str(r"\x3E"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        }
        Cow::Owned(out)
    }
}

impl fmt::Display for PatternLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.open, self.body, self.close, self.modifiers)
    }
}

/// The closing partner of a bracket-style delimiter
fn closing_partner(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}
