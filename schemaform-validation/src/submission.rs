//! Submission state handed to the renderer.

use serde::Serialize;
use serde_json::Value;

use crate::validator::Validation;
use crate::violation::{ErrorMap, Violation};

/// What the user posted and what was wrong with it.
///
/// The default value is the state of a form that was never submitted:
/// no data and no errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    pub submitted: bool,
    pub data: Value,
    pub errors: ErrorMap,
}

impl Submission {
    /// A fresh, unsubmitted form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill values without marking the form submitted.
    pub fn prefilled(data: Value) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations for `key`, falling back to its last dotted segment.
    pub fn errors_for(&self, key: &str) -> &[Violation] {
        let direct = self.errors.get(key);
        if !direct.is_empty() {
            return direct;
        }
        match key.rsplit_once('.') {
            Some((_, last)) => self.errors.get(last),
            None => direct,
        }
    }
}

impl Validation {
    /// Pair this outcome with the data that produced it.
    pub fn into_submission(self, data: Value) -> Submission {
        Submission {
            submitted: true,
            data,
            errors: self.errors,
        }
    }
}
