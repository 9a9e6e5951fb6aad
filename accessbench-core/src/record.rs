//! The mutable record every accessor strategy writes to.

/// A plain two-field data holder: one text field, one integer field.
///
/// A fresh record is allocated at the start of each measurement iteration and
/// reused across the operations within it. Records are never shared across
/// threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRecord {
    pub(crate) text: String,
    pub(crate) number: i64,
}

impl TargetRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the text field.
    ///
    /// Writes in place so steady-state operations do not allocate once the
    /// buffer has grown to the payload length.
    #[inline(always)]
    pub fn set_text(&mut self, value: &str) {
        self.text.clear();
        self.text.push_str(value);
    }

    /// Overwrite the integer field.
    #[inline(always)]
    pub fn set_number(&mut self, value: i64) {
        self.number = value;
    }

    /// Current text value.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current integer value.
    pub fn number(&self) -> i64 {
        self.number
    }
}
