use crate::types::{Kind, Value};

/// An external flag handle: a typed value plus whether the command line
/// explicitly set it.
///
/// Starts at the kind's zero value. One handle may back several fields that
/// share an external name.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    value: Value,
    set: bool,
}

impl Flag {
    pub fn new(kind: Kind) -> Self {
        Self {
            value: Value::zero(kind),
            set: false,
        }
    }

    /// Parse `text` under the handle's kind and mark the flag as set.
    ///
    /// On error the handle is left exactly as it was.
    pub fn set_from_text(&mut self, text: &str) -> Result<(), String> {
        self.value = self.kind().parse(text)?;
        self.set = true;
        Ok(())
    }

    pub fn as_text(&self) -> String {
        self.value.to_string()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn was_set(&self) -> bool {
        self.set
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }
}
