//! Round-trip test suite
//!
//! Tests that a raw regex wrapped with `regex_to_pattern` behaves exactly like
//! the raw regex handed to the engine directly.

use delimex::{
    PatternLiteral, ReplacePairs, Replacement, compile, pattern_error, quote_class,
    regex_error, regex_to_pattern, replace_pairs, replace_pairs_all, un_extended,
};
use proptest::prelude::*;
use regex::Regex;

/// Compile `raw` directly and through its pattern literal, then compare matches
fn assert_same_matches(raw: &str, subjects: &[&str]) {
    let direct = Regex::new(raw).unwrap();
    let wrapped = compile(&regex_to_pattern(raw, "")).unwrap();
    for subject in subjects {
        let expected: Vec<_> = direct.find_iter(subject).map(|m| m.range()).collect();
        let actual: Vec<_> = wrapped.find_iter(subject).map(|m| m.range()).collect();
        assert_eq!(expected, actual, "regex {:?} on {:?}", raw, subject);
    }
}

mod delimiter_escaping {
    use super::*;

    #[test]
    fn test_url_with_slashes() {
        assert_same_matches(
            "^http://([^/:]+)",
            &["http://example.com/x", "https://a", "http://a:80/"],
        );
    }

    #[test]
    fn test_already_escaped_delimiter() {
        assert_eq!(regex_to_pattern(r"\/", ""), r"/\//");
        assert_same_matches(r"a\/b", &["a/b", "ab", "xa/by"]);
    }

    #[test]
    fn test_escaped_backslash_then_delimiter() {
        assert_same_matches(r"\\/", &[r"\/", "/", r"\\//"]);
    }

    #[test]
    fn test_trailing_backslash_matches_literal() {
        assert_eq!(regex_to_pattern(r"a\", ""), r"/a\\/");
        let regex = compile(&regex_to_pattern(r"a\", "")).unwrap();
        assert!(regex.is_match(r"a\"));
        assert!(!regex.is_match("a"));
    }

    #[test]
    fn test_empty_regex() {
        assert_eq!(regex_to_pattern("", ""), "//");
        assert_eq!(regex_to_pattern("", "i"), "//i");
        assert!(compile("//i").unwrap().is_match("anything"));
    }

    #[test]
    fn test_modifiers_apply() {
        let regex = compile(&regex_to_pattern("a/b", "i")).unwrap();
        assert!(regex.is_match("A/B"));
    }

    #[test]
    fn test_invalid_modifier_is_a_validation_concern() {
        let pattern = regex_to_pattern("abc", "q");
        assert_eq!(pattern, "/abc/q");
        assert_eq!(pattern_error(&pattern).as_deref(), Some("unknown modifier 'q'"));
    }
}

mod class_quoting {
    use super::*;

    #[test]
    fn test_quoted_class_matches_each_char() {
        let class = quote_class(r"a-z]\", None);
        assert_eq!(class, r"a\-z\]\\");
        let regex = Regex::new(&format!("^[{}]$", class)).unwrap();
        for c in ["a", "-", "z", "]", r"\"] {
            assert!(regex.is_match(c), "{:?} should match", c);
        }
        assert!(!regex.is_match("m"));
    }

    #[test]
    fn test_quoted_class_inside_pattern_literal() {
        let class = quote_class("/#", Some('/'));
        let regex = compile(&format!("/[{}]/", class)).unwrap();
        assert!(regex.is_match("/"));
        assert!(regex.is_match("#"));
    }
}

mod extended_mode {
    use super::*;

    #[test]
    fn test_unextended_equivalent() {
        let extended = "/ (\\d{3}) - (\\d{4})  # phone\n /x";
        let plain = un_extended(extended);
        assert_eq!(plain, r"/(\d{3})-(\d{4})/");
        let a = compile(extended).unwrap();
        let b = compile(&plain).unwrap();
        for subject in ["555-1234", "5551234", "call 555-1234 now"] {
            assert_eq!(a.is_match(subject), b.is_match(subject));
        }
        assert!(!PatternLiteral::parse(&plain).unwrap().modifiers.extended);
    }

    #[test]
    fn test_x_in_body_survives() {
        assert_eq!(un_extended("/x+/ix"), "/x+/i");
    }

    #[test]
    fn test_escaped_hash_survives() {
        let plain = un_extended("/a\\#b # comment\n/x");
        assert_eq!(plain, r"/a\#b/");
        assert!(compile(&plain).unwrap().is_match("a#b"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_no_error_is_not_empty_message() {
        assert_eq!(pattern_error("/ok/"), None);
        assert_ne!(pattern_error("/(/"), Some(String::new()));
    }

    #[test]
    fn test_unwrapped_slashes_reported() {
        assert_eq!(
            pattern_error("/^http://x/").as_deref(),
            Some("unknown modifier '/'")
        );
        assert_eq!(regex_error("^http://x"), None);
    }

    #[test]
    fn test_validation_is_thread_safe() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        regex_error("(")
                    } else {
                        regex_error("a/b")
                    }
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.is_some(), i % 2 == 0);
        }
    }
}

mod replacement_pairs {
    use super::*;

    #[test]
    fn test_pairs_feed_each_other() {
        let pairs = ReplacePairs::new()
            .with(regex_to_pattern("https?://", "i"), "")
            .with(r"/\.com\b/", ".org");
        assert_eq!(
            replace_pairs(&pairs, "see HTTP://example.com/x").unwrap(),
            "see example.org/x"
        );
    }

    #[test]
    fn test_callback_receives_groups() {
        let pairs = ReplacePairs::new().with(
            r"/(\w+)=(\w+)?/",
            Replacement::callback(|caps| {
                let value = caps.get(2).map_or("<none>", |m| m.as_str());
                format!("{}:{}", &caps[1], value)
            }),
        );
        assert_eq!(replace_pairs(&pairs, "a=1 b=").unwrap(), "a:1 b:<none>");
    }

    #[test]
    fn test_bad_pattern_means_no_replacement() {
        let pairs = ReplacePairs::new().with("/a/", "b").with("/a", "c");
        assert!(replace_pairs_all(&pairs, &["aaa", "bbb"]).is_err());
    }
}

fn safe_body() -> impl Strategy<Value = String> {
    // Bodies built from whole tokens, so they never end in a lone backslash
    prop::collection::vec(
        prop_oneof![
            Just("a".to_string()),
            Just("b".to_string()),
            Just("/".to_string()),
            Just(r"\/".to_string()),
            Just(r"\\".to_string()),
            Just(".".to_string()),
            Just("*".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("[/]".to_string()),
        ],
        0..12,
    )
    .prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn prop_pattern_always_splits_back(body in ".*", modifiers in "[a-z]{0,3}") {
        let pattern = regex_to_pattern(&body, &modifiers);
        let literal = PatternLiteral::parse(&pattern);
        let stripped = &pattern[1..pattern.len() - modifiers.len() - 1];
        // Only the modifier list can be rejected
        match &literal {
            Ok(literal) => prop_assert_eq!(literal.body, stripped),
            Err(err) => prop_assert!(matches!(
                err,
                delimex::PatternError::UnknownModifier(_) | delimex::PatternError::UnsupportedModifier(_)
            )),
        }
        prop_assert_eq!(un_escape_delimiters(stripped), un_escape_delimiters_raw(&body));
    }

    #[test]
    fn prop_engine_agrees(body in safe_body(), subject in "[ab/\\\\]{0,8}") {
        let direct = Regex::new(&body);
        let wrapped = compile(&regex_to_pattern(&body, ""));
        prop_assert_eq!(direct.is_ok(), wrapped.is_ok());
        if let (Ok(direct), Ok(wrapped)) = (direct, wrapped) {
            prop_assert_eq!(direct.is_match(&subject), wrapped.is_match(&subject));
        }
    }

    #[test]
    fn prop_quoted_class_matches_exactly_its_chars(text in "[a-z\\-\\]\\\\/]{1,8}", probe in "[a-z\\-\\]\\\\/]") {
        let regex = Regex::new(&format!("^[{}]$", quote_class(&text, Some('/')))).unwrap();
        prop_assert_eq!(regex.is_match(&probe), text.contains(probe.as_str()));
    }
}

/// Drop the backslash of every escaped delimiter in an escaped body
fn un_escape_delimiters(escaped: &str) -> String {
    let mut out = String::new();
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('/') => out.push('/'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// The same normalization applied to a raw body, completing a dangling backslash
fn un_escape_delimiters_raw(raw: &str) -> String {
    let mut completed = raw.to_string();
    let trailing = raw.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        completed.push('\\');
    }
    un_escape_delimiters(&completed)
}
