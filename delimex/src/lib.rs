//! Delimex Core Library
//!
//! Tools for using externally sourced regex text as delimited pattern
//! literals: escaping a raw regex into `/.../flags` form, quoting text for a
//! character class, normalizing extended-mode patterns, checking patterns
//! against the engine, and running ordered replacement pairs.

pub mod class;
pub mod error;
pub mod escape;
pub mod extended;
pub mod literal;
pub mod replace;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use class::{QuoteTable, quote_class};
pub use error::{PatternError, ReplaceError, Result};
pub use escape::{DELIMITER, regex_to_pattern};
pub use extended::un_extended;
pub use literal::{Modifiers, PatternLiteral};
pub use replace::{
    ReplaceFn, ReplacePairs, Replacement, ReplacementTemplate, TemplatePart, replace_pairs,
    replace_pairs_all,
};
pub use validate::{compile, compile_regex, pattern_error, regex_error};
