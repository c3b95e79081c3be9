// ── Field-level validation ──
//
// Rules never short-circuit: every rule runs so the form can show all
// messages at once. A field appears in the map only when it is invalid.

use std::collections::BTreeMap;

/// Field name (wire name, e.g. `"licensePlate"`) to error message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Outcome of validating a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: FieldErrors,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for one field, if it failed.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Accumulates rule violations for one draft.
#[derive(Debug, Default)]
pub(crate) struct Rules {
    errors: FieldErrors,
}

impl Rules {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Text must contain something other than whitespace.
    pub(crate) fn required(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.insert(field, message.to_owned());
        }
        self
    }

    /// Number must be strictly positive (NaN fails).
    pub(crate) fn positive(mut self, field: &'static str, value: f64, message: &str) -> Self {
        if value.is_nan() || value <= 0.0 {
            self.errors.insert(field, message.to_owned());
        }
        self
    }

    /// Non-blank value must belong to a closed vocabulary. Blank values are
    /// left to `required`, and an earlier message for the field wins.
    pub(crate) fn one_of(
        mut self,
        field: &'static str,
        value: Option<&str>,
        allowed: &[&str],
        label: &str,
    ) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return self;
        };
        if !allowed.contains(&value) {
            self.errors
                .entry(field)
                .or_insert_with(|| format!("{label} must be one of: {}.", allowed.join(", ")));
        }
        self
    }

    pub(crate) fn finish(self) -> ValidationReport {
        ValidationReport {
            errors: self.errors,
        }
    }
}
