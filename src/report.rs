//! Resolution report: what every bound field ended up as, and why.

use std::fmt;

use serde::Serialize;

use crate::error::FlagbindError;
use crate::types::{Kind, Source};

/// One bound field after a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    /// External flag name.
    pub name: String,
    pub record: &'static str,
    pub field: &'static str,
    pub kind: Kind,
    /// The field's final value, rendered in flag syntax.
    pub value: String,
    pub source: Source,
}

/// Returned by a successful load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    fields: Vec<ResolvedField>,
    args: Vec<String>,
}

impl Report {
    pub(crate) fn new(args: Vec<String>) -> Self {
        Self {
            fields: Vec::new(),
            args,
        }
    }

    pub(crate) fn push(&mut self, field: ResolvedField) {
        self.fields.push(field);
    }

    /// Bound fields in record order, then declaration order.
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// First field bound to the external name `name`.
    pub fn get(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Positional arguments left after the flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn to_json(&self) -> Result<String, FlagbindError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} = {}  # {}", field.name, field.value, field.source)?;
        }
        Ok(())
    }
}
