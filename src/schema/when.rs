use super::FieldValue;

/// A value that is only present when its condition holds.
///
/// Factories unwrap these before validation: a matched wrapper becomes its
/// value, an unmatched one makes the field absent (and is dropped from
/// `many` collections).
#[derive(Debug, Clone)]
pub struct When {
    matched: bool,
    value: Option<FieldValue>,
}

impl When {
    pub fn new(condition: bool, value: impl Into<FieldValue>) -> Self {
        Self {
            matched: condition,
            value: condition.then(|| value.into()),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Keeps the first matching branch; otherwise tries `condition`.
    pub fn elseif(self, condition: bool, value: impl Into<FieldValue>) -> When {
        if self.matched {
            self
        } else {
            When::new(condition, value)
        }
    }

    /// The matched value, or `fallback` when nothing matched.
    pub fn otherwise(self, fallback: impl Into<FieldValue>) -> FieldValue {
        match self.value {
            Some(value) if self.matched => value,
            _ => fallback.into(),
        }
    }

    pub fn value_of(self) -> Option<FieldValue> {
        if self.matched { self.value } else { None }
    }
}

/// Shorthand for [`When::new`].
pub fn when(condition: bool, value: impl Into<FieldValue>) -> When {
    When::new(condition, value)
}
