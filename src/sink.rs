//! Output sinks
//!
//! After every change the serialized tag list is written to an optional
//! output field and passed to an optional callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared text field receiving the serialized tags
///
/// Clones share the same value, so the caller keeps one handle and reads
/// it while the controller writes through another.
#[derive(Debug, Clone, Default)]
pub struct OutputField(Rc<RefCell<String>>);

impl OutputField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field value
    #[must_use]
    pub fn value(&self) -> String {
        self.0.borrow().clone()
    }

    /// Replace the field value
    pub fn set(&self, value: &str) {
        let mut field = self.0.borrow_mut();
        field.clear();
        field.push_str(value);
    }
}

/// Callback invoked with the serialized tags
pub type UpdateFn = Box<dyn FnMut(&str)>;

/// Destination for serialized tag output: a field, a callback, both, or neither
#[derive(Default)]
pub struct OutputSink {
    field: Option<OutputField>,
    callback: Option<UpdateFn>,
}

impl OutputSink {
    /// Sink with no destination
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Write to `field` on every change
    #[must_use]
    pub fn with_field(mut self, field: OutputField) -> Self {
        self.field = Some(field);
        self
    }

    /// Call `callback` on every change
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub const fn has_field(&self) -> bool {
        self.field.is_some()
    }

    /// Deliver one serialized value to every destination
    pub fn notify(&mut self, serialized: &str) {
        if let Some(field) = &self.field {
            field.set(serialized);
        }
        if let Some(callback) = self.callback.as_mut() {
            callback(serialized);
        }
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("field", &self.field)
            .field("callback", &self.callback.as_ref().map(|_| "FnMut(&str)"))
            .finish()
    }
}
