//! Syntax checking for pattern literals and raw regexes
//!
//! To tell whether a pattern is valid we simply try to compile it. The engine
//! reports failures by value, so no shared "last error" state is read or
//! disturbed along the way.

use regex::{Regex, RegexBuilder};

use crate::error::{PatternError, Result};
use crate::escape::regex_to_pattern;
use crate::literal::PatternLiteral;

/// Compile a delimited pattern literal
///
/// # Example
/// ```
/// use delimex::compile;
///
/// let regex = compile("/colou?r/i").unwrap();
/// assert!(regex.is_match("COLOR"));
/// ```
pub fn compile(pattern: &str) -> Result<Regex> {
    let literal = PatternLiteral::parse(pattern)?;
    let mode = literal.modifiers;

    let body = literal.engine_body();
    let body = if mode.anchored {
        // A comment on the last line would swallow the closing paren
        let tail = if mode.extended { "\n)" } else { ")" };
        format!(r"\A(?:{}{}", body, tail)
    } else {
        body.into_owned()
    };

    RegexBuilder::new(&body)
        .case_insensitive(mode.case_insensitive)
        .multi_line(mode.multi_line)
        .dot_matches_new_line(mode.dot_all)
        .ignore_whitespace(mode.extended)
        .swap_greed(mode.ungreedy)
        .build()
        .map_err(|err| {
            tracing::debug!(pattern, error = %err, "engine rejected pattern");
            PatternError::from(err)
        })
}

/// Compile a raw regex after wrapping it with [`regex_to_pattern`]
pub fn compile_regex(regex: &str, modifiers: &str) -> Result<Regex> {
    compile(&regex_to_pattern(regex, modifiers))
}

/// Return a description of what is wrong with `pattern`, or `None` if it is valid
///
/// # Example
/// ```
/// use delimex::pattern_error;
///
/// assert_eq!(pattern_error("/a+/i"), None);
/// assert_eq!(
///     pattern_error("/^http://x/").as_deref(),
///     Some("unknown modifier '/'")
/// );
/// ```
pub fn pattern_error(pattern: &str) -> Option<String> {
    compile(pattern).err().map(|err| err.to_string())
}

/// Return a description of what is wrong with a raw regex, or `None` if it is valid
pub fn regex_error(regex: &str) -> Option<String> {
    pattern_error(&regex_to_pattern(regex, ""))
}
