//! Normalizing extended-mode patterns
//!
//! Patterns written for extended mode (`x` modifier) may contain whitespace
//! and `#` comments that the engine ignores. [`un_extended`] drops the `x`
//! modifier and strips that whitespace and those comments so the pattern
//! means the same thing to an engine without extended mode.
//!
//! The stripping is purely lexical. Whitespace and `#` inside a character
//! class are removed even though extended mode keeps them literal there, and
//! a `#` after an escaped backslash (`\\#`) is kept even though it starts a
//! comment. Callers rely on this behavior, so it is preserved as is.

/// Remove the extended-mode modifier and strip whitespace and comments
///
/// # Example
/// ```
/// use delimex::un_extended;
///
/// assert_eq!(un_extended("/ a+ # letters\n b /xi"), "/a+b/i");
/// assert_eq!(un_extended(r"/a\#b/x"), r"/a\#b/");
/// ```
pub fn un_extended(pattern: &str) -> String {
    strip_insignificant(&drop_extended_flag(pattern))
}

/// Remove every `x` from the run of letters that ends the pattern
///
/// Like a `$` anchor, the run may end just before a single final newline.
fn drop_extended_flag(pattern: &str) -> String {
    let end = pattern.strip_suffix('\n').unwrap_or(pattern).len();
    let head = &pattern[..end];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(end, |(i, _)| i);

    if !head[start..].contains('x') {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len());
    out.push_str(&pattern[..start]);
    out.extend(head[start..].chars().filter(|&c| c != 'x'));
    out.push_str(&pattern[end..]);
    out
}

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Strip whitespace runs and unescaped `#` comments
///
/// A comment needs at least one character before the line ends, so a `#`
/// directly followed by a line break or the end of the pattern stays.
fn strip_insignificant(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_space(c) {
            i += 1;
            continue;
        }

        let escaped = i > 0 && chars[i - 1] == '\\';
        let has_text = chars
            .get(i + 1)
            .is_some_and(|&next| next != '\r' && next != '\n');
        if c == '#' && !escaped && has_text {
            while i < chars.len() && chars[i] != '\r' && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}
