//! Running ordered pattern/replacement pairs over a subject
//!
//! Each pair is a delimited pattern literal and either a replacement
//! template or a callback. Pairs run in insertion order, each one seeing the
//! output of the previous one.
//!
//! Replacement templates can reference capture groups as `\1`, `$1` or
//! `${1}` (one or two digits, `0` being the entire match). A backslash in
//! front of another backslash or a dollar sign makes it literal.

use std::fmt;

use regex::{Captures, Regex};

use crate::error::ReplaceError;
use crate::validate::compile;

/// A part of a replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text
    Literal(String),
    /// Reference to a capture group by number (0 is the entire match)
    Group(usize),
}

/// A parsed replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    parts: Vec<TemplatePart>,
}

impl ReplacementTemplate {
    /// Parse a replacement template
    pub fn parse(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut parts = Vec::new();
        let mut current_literal = String::new();
        let mut last = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\\' || c == '$' {
                if last == Some('\\') {
                    // The backslash before us was copied already; make it us
                    current_literal.pop();
                    current_literal.push(c);
                    last = None;
                    i += 1;
                    continue;
                }
                if let Some((group, len)) = Self::read_group(&chars[i..]) {
                    if !current_literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut current_literal)));
                    }
                    parts.push(TemplatePart::Group(group));
                    last = None;
                    i += len;
                    continue;
                }
            }
            current_literal.push(c);
            last = Some(c);
            i += 1;
        }

        if !current_literal.is_empty() {
            parts.push(TemplatePart::Literal(current_literal));
        }

        ReplacementTemplate { parts }
    }

    /// Read a group reference at the start of `chars`
    ///
    /// Returns the group number and the number of characters it spans.
    fn read_group(chars: &[char]) -> Option<(usize, usize)> {
        let braced = chars.first() == Some(&'$') && chars.get(1) == Some(&'{');
        let mut pos = if braced { 2 } else { 1 };

        let mut group = chars.get(pos)?.to_digit(10)? as usize;
        pos += 1;
        if let Some(digit) = chars.get(pos).and_then(|c| c.to_digit(10)) {
            group = group * 10 + digit as usize;
            pos += 1;
        }

        if braced {
            if chars.get(pos) != Some(&'}') {
                return None;
            }
            pos += 1;
        }

        Some((group, pos))
    }

    /// Expand the template for one match
    ///
    /// Groups that did not participate or do not exist expand to nothing.
    pub fn expand(&self, caps: &Captures<'_>, dst: &mut String) {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => dst.push_str(text),
                TemplatePart::Group(n) => {
                    if let Some(m) = caps.get(*n) {
                        dst.push_str(m.as_str());
                    }
                }
            }
        }
    }

    /// Get the parts of the template
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }
}

/// Callback computing the replacement for one match
pub type ReplaceFn = dyn Fn(&Captures<'_>) -> String + Send + Sync;

/// What to put in place of each match
pub enum Replacement {
    /// A template with group references
    Template(ReplacementTemplate),
    /// A callback given the match data
    Callback(Box<ReplaceFn>),
}

impl Replacement {
    /// A template replacement
    pub fn template(template: &str) -> Self {
        Replacement::Template(ReplacementTemplate::parse(template))
    }

    /// A callback replacement
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        Replacement::Callback(Box::new(f))
    }

    fn apply(&self, regex: &Regex, subject: &str) -> String {
        match self {
            Replacement::Template(template) => regex
                .replace_all(subject, |caps: &Captures<'_>| {
                    let mut out = String::new();
                    template.expand(caps, &mut out);
                    out
                })
                .into_owned(),
            Replacement::Callback(f) => regex
                .replace_all(subject, |caps: &Captures<'_>| f(caps))
                .into_owned(),
        }
    }
}

impl From<&str> for Replacement {
    fn from(template: &str) -> Self {
        Replacement::template(template)
    }
}

impl From<String> for Replacement {
    fn from(template: String) -> Self {
        Replacement::template(&template)
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Replacement::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// An ordered list of pattern/replacement pairs
#[derive(Debug, Default)]
pub struct ReplacePairs {
    pairs: Vec<(String, Replacement)>,
}

impl ReplacePairs {
    /// Create an empty list
    pub fn new() -> Self {
        ReplacePairs::default()
    }

    /// Append a pair; it runs after every pair added before it
    pub fn push(&mut self, pattern: impl Into<String>, replacement: impl Into<Replacement>) {
        self.pairs.push((pattern.into(), replacement.into()));
    }

    /// Builder-style [`ReplacePairs::push`]
    pub fn with(mut self, pattern: impl Into<String>, replacement: impl Into<Replacement>) -> Self {
        self.push(pattern, replacement);
        self
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Compile every pattern, failing on the first invalid one
    fn compile_all(&self) -> Result<Vec<(Regex, &Replacement)>, ReplaceError> {
        self.pairs
            .iter()
            .map(|(pattern, replacement)| {
                compile(pattern)
                    .map(|regex| (regex, replacement))
                    .map_err(|source| ReplaceError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect()
    }
}

impl<P, R> FromIterator<(P, R)> for ReplacePairs
where
    P: Into<String>,
    R: Into<Replacement>,
{
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        let mut pairs = ReplacePairs::new();
        for (pattern, replacement) in iter {
            pairs.push(pattern, replacement);
        }
        pairs
    }
}

fn run(compiled: &[(Regex, &Replacement)], subject: &str) -> String {
    let mut current = subject.to_string();
    for (regex, replacement) in compiled {
        tracing::trace!(pattern = regex.as_str(), "applying replacement pair");
        current = replacement.apply(regex, &current);
    }
    current
}

/// Apply every pair to `subject` in order
///
/// All patterns are compiled first; if any is invalid nothing is replaced.
///
/// # Example
/// ```
/// use delimex::{ReplacePairs, replace_pairs};
///
/// let pairs = ReplacePairs::new()
///     .with("/colou?r/i", "paint")
///     .with(r"/(\w+) paint/", "$1-paint");
/// assert_eq!(replace_pairs(&pairs, "Red Colour").unwrap(), "Red-paint");
/// ```
pub fn replace_pairs(pairs: &ReplacePairs, subject: &str) -> Result<String, ReplaceError> {
    let compiled = pairs.compile_all()?;
    Ok(run(&compiled, subject))
}

/// Apply every pair to each subject, returning the results in order
pub fn replace_pairs_all<S: AsRef<str>>(
    pairs: &ReplacePairs,
    subjects: &[S],
) -> Result<Vec<String>, ReplaceError> {
    let compiled = pairs.compile_all()?;
    Ok(subjects
        .iter()
        .map(|subject| run(&compiled, subject.as_ref()))
        .collect())
}
