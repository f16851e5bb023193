//! Quoting text for use inside a bracket character class
//!
//! Inside `[...]` only a handful of characters are special: the backslash,
//! the range hyphen, and the closing bracket. [`quote_class`] escapes exactly
//! those, plus an optional delimiter the caller will wrap the pattern in.

/// Characters that must be escaped inside a character class
const CLASS_SPECIALS: [char; 3] = ['\\', '-', ']'];

/// Substitution table used by [`quote_class`]
///
/// Every entry maps a single character to that character prefixed by a
/// backslash. Characters without an entry pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteTable {
    delimiter: Option<char>,
}

impl QuoteTable {
    /// The fixed table, optionally extended with a delimiter
    pub fn new(delimiter: Option<char>) -> Self {
        QuoteTable { delimiter }
    }

    /// Look up the replacement for `c`, if it has one
    pub fn lookup(&self, c: char) -> Option<[char; 2]> {
        if CLASS_SPECIALS.contains(&c) || self.delimiter == Some(c) {
            Some(['\\', c])
        } else {
            None
        }
    }

    /// Apply the table once per character, left to right
    pub fn apply(&self, input: &str) -> String {
        let mut quoted = String::with_capacity(input.len());
        for c in input.chars() {
            match self.lookup(c) {
                Some(replacement) => quoted.extend(replacement),
                None => quoted.push(c),
            }
        }
        quoted
    }
}

/// Escape `class` so it can be placed between `[` and `]`
///
/// `delimiter`, when given, is escaped as well.
///
/// # Example
/// ```
/// use delimex::quote_class;
///
/// assert_eq!(quote_class(r"a-z]\", None), r"a\-z\]\\");
/// assert_eq!(quote_class("a/b", Some('/')), r"a\/b");
/// ```
pub fn quote_class(class: &str, delimiter: Option<char>) -> String {
    QuoteTable::new(delimiter).apply(class)
}
