//! Testing utilities for taginput
//!
//! Helpers for driving a controller headlessly: a sink that records every
//! notification and a key-name parser for compact key sequences.
//!
//! Only available when compiled with `cfg(test)`.

use crate::keys::{Key, parse_key_sequence};
use crate::sink::OutputSink;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every value delivered to the sinks it hands out
#[derive(Debug, Clone, Default)]
pub struct CountingSink {
    values: Rc<RefCell<Vec<String>>>,
}

impl CountingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose callback appends to this recorder
    #[must_use]
    pub fn sink(&self) -> OutputSink {
        let values = Rc::clone(&self.values);
        OutputSink::none().with_callback(move |value| values.borrow_mut().push(value.to_string()))
    }

    /// Every value received so far, oldest first
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.values.borrow().clone()
    }
}

/// Parse space-separated key names
///
/// # Panics
/// Panics if a name is not a key.
#[must_use]
pub fn keys(names: &str) -> Vec<Key> {
    parse_key_sequence(names.split_whitespace()).expect("valid key names")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_sink_shares_values() {
        let counting = CountingSink::new();
        let mut first = counting.sink();
        let mut second = counting.sink();
        first.notify("a");
        second.notify("b");
        assert_eq!(counting.values(), vec!["a", "b"]);
    }

    #[test]
    fn test_keys() {
        assert_eq!(keys("Control x"), vec![Key::Control, Key::Char('x')]);
    }
}
