//! WebAssembly bindings for JavaScript
//!
//! This module provides WASM bindings using wasm-bindgen for use in browsers
//! and Node.js. Enable with the "wasm" feature flag.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Wrap a raw regex in delimiters, escaping conflicts
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = regexToPattern)]
pub fn regex_to_pattern(regex: &str, modifiers: Option<String>) -> String {
    crate::regex_to_pattern(regex, modifiers.as_deref().unwrap_or(""))
}

/// Escape text for use inside a character class
///
/// Only the first character of `delimiter` is used.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = quoteClass)]
pub fn quote_class(class: &str, delimiter: Option<String>) -> String {
    let delimiter = delimiter.and_then(|d| d.chars().next());
    crate::quote_class(class, delimiter)
}

/// Strip extended-mode whitespace and comments
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = unExtended)]
pub fn un_extended(pattern: &str) -> String {
    crate::un_extended(pattern)
}

/// Error message for an invalid pattern literal, or `undefined`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = patternError)]
pub fn pattern_error(pattern: &str) -> Option<String> {
    crate::pattern_error(pattern)
}

/// Error message for an invalid raw regex, or `undefined`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = regexError)]
pub fn regex_error(regex: &str) -> Option<String> {
    crate::regex_error(regex)
}

/// Initialize panic hook for better error messages in WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
