//! Python bindings for Delimex
//!
//! This module exposes the pattern helpers to Python. Values arriving from
//! Python are dynamically typed, so `replace_pairs` checks every key and
//! value before anything is replaced.

use std::sync::{Arc, Mutex};

use delimex::{ReplacePairs, Replacement};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyString};

/// Wrap a raw regex in delimiters and append the modifiers
#[pyfunction(signature = (regex, modifiers=""))]
fn regex_to_pattern(regex: &str, modifiers: &str) -> String {
    delimex::regex_to_pattern(regex, modifiers)
}

/// Escape text for use inside a character class
#[pyfunction(signature = (class_, delimiter=None))]
fn quote_class(class_: &str, delimiter: Option<&str>) -> PyResult<String> {
    let delimiter = match delimiter {
        None => None,
        Some(d) => {
            let mut chars = d.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    return Err(PyTypeError::new_err(
                        "delimiter must be a single character",
                    ));
                }
            }
        }
    };
    Ok(delimex::quote_class(class_, delimiter))
}

/// Strip extended-mode whitespace and comments
#[pyfunction]
fn un_extended(pattern: &str) -> String {
    delimex::un_extended(pattern)
}

/// Error message for an invalid pattern, or None
#[pyfunction]
fn pattern_error(pattern: &str) -> Option<String> {
    delimex::pattern_error(pattern)
}

/// Error message for an invalid raw regex, or None
#[pyfunction]
fn regex_error(regex: &str) -> Option<String> {
    delimex::regex_error(regex)
}

/// Build a callback replacement calling a Python callable
///
/// The callable gets the list of groups (None for groups that did not
/// participate). The first exception raised, or a non-str return value, is
/// kept in `failure` and reported once the replacement is done.
fn py_callback(func: Py<PyAny>, failure: Arc<Mutex<Option<PyErr>>>) -> Replacement {
    Replacement::callback(move |caps| {
        let groups: Vec<Option<String>> = caps
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        Python::with_gil(|py| {
            let result = func
                .call1(py, (groups,))
                .and_then(|value| value.extract::<String>(py));
            match result {
                Ok(text) => text,
                Err(err) => {
                    if let Ok(mut slot) = failure.lock() {
                        slot.get_or_insert(err);
                    }
                    String::new()
                }
            }
        })
    })
}

/// Apply each pattern/replacement pair in order to a string or list of strings
///
/// Keys must be str; values must be str or callable. Nothing is replaced if
/// any pair is invalid.
#[pyfunction]
fn replace_pairs<'py>(
    py: Python<'py>,
    pairs: &Bound<'py, PyDict>,
    subject: &Bound<'py, PyAny>,
) -> PyResult<PyObject> {
    let failure = Arc::new(Mutex::new(None));
    let mut compiled = ReplacePairs::new();

    for (key, value) in pairs.iter() {
        let pattern: String = key
            .downcast::<PyString>()
            .map_err(|_| PyTypeError::new_err("pattern keys must be str"))?
            .to_string();
        if let Ok(text) = value.downcast::<PyString>() {
            compiled.push(pattern, Replacement::template(text.to_str()?));
        } else if value.is_callable() {
            compiled.push(pattern, py_callback(value.unbind(), Arc::clone(&failure)));
        } else {
            return Err(PyTypeError::new_err(
                "replacements must be str or callable",
            ));
        }
    }

    let (subjects, single) = if let Ok(text) = subject.downcast::<PyString>() {
        (vec![text.to_str()?.to_string()], true)
    } else if let Ok(list) = subject.downcast::<PyList>() {
        (list.extract::<Vec<String>>()?, false)
    } else {
        return Err(PyTypeError::new_err("subject must be str or list of str"));
    };

    let results = py
        .allow_threads(|| delimex::replace_pairs_all(&compiled, &subjects))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let pending = failure.lock().ok().and_then(|mut slot| slot.take());
    if let Some(err) = pending {
        return Err(err);
    }

    if single {
        let text = results.into_iter().next().unwrap_or_default();
        Ok(PyString::new(py, &text).into_any().unbind())
    } else {
        Ok(PyList::new(py, results)?.into_any().unbind())
    }
}

/// Delimex Python module
#[pymodule(name = "delimex")]
fn delimex_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(regex_to_pattern, m)?)?;
    m.add_function(wrap_pyfunction!(quote_class, m)?)?;
    m.add_function(wrap_pyfunction!(un_extended, m)?)?;
    m.add_function(wrap_pyfunction!(pattern_error, m)?)?;
    m.add_function(wrap_pyfunction!(regex_error, m)?)?;
    m.add_function(wrap_pyfunction!(replace_pairs, m)?)?;
    Ok(())
}
