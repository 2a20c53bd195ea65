//! Field bindings: resolve one field's final value and write it back.
//!
//! Precedence, highest first:
//!
//! 1. the flag was explicitly set on the command line
//! 2. an environment variable named after the flag is present
//! 3. the field declared a default
//! 4. nothing: the field keeps its pre-load value

use tracing::trace;

use crate::env::Env;
use crate::error::FlagbindError;
use crate::record::Record;
use crate::table::{FlagId, FlagTable};
use crate::types::{InputSource, Kind, Source, Value};

/// One bound field: its flag handle, parsed default, and target accessor.
#[derive(Debug, Clone)]
pub struct Binding {
    record: &'static str,
    field: &'static str,
    name: String,
    kind: Kind,
    flag: FlagId,
    default: Option<Value>,
}

/// The value chosen for a field and where it came from.
///
/// `value` is `None` only when `source` is [`Source::Untouched`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Option<Value>,
    pub source: Source,
}

impl Binding {
    pub(crate) fn new(
        record: &'static str,
        field: &'static str,
        name: &str,
        kind: Kind,
        flag: FlagId,
        default: Option<Value>,
    ) -> Self {
        Self {
            record,
            field,
            name: name.to_string(),
            kind,
            flag,
            default,
        }
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn flag(&self) -> FlagId {
        self.flag
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Choose the field's value. Has no side effects.
    pub fn resolve(&self, table: &FlagTable, env: &Env) -> Result<Resolution, FlagbindError> {
        let flag = table.flag(self.flag);
        let resolution = if flag.was_set() {
            Resolution {
                value: Some(flag.value().clone()),
                source: Source::CommandLine,
            }
        } else if let Some(text) = env.lookup(&self.name) {
            let value = self.kind.parse(text).map_err(|reason| FlagbindError::InvalidExternalInput {
                name: env.var_name(&self.name),
                text: text.to_string(),
                kind: self.kind,
                input: InputSource::Environment,
                reason,
            })?;
            Resolution {
                value: Some(value),
                source: Source::Environment,
            }
        } else if let Some(default) = &self.default {
            Resolution {
                value: Some(default.clone()),
                source: Source::Default,
            }
        } else {
            Resolution {
                value: None,
                source: Source::Untouched,
            }
        };

        trace!(
            flag = %self.name,
            field = self.field,
            source = %resolution.source,
            "resolved field"
        );
        Ok(resolution)
    }

    /// Write the resolved value into the record: one write, or none when the
    /// resolution left the field untouched.
    pub fn apply(
        &self,
        record: &mut dyn Record,
        resolution: &Resolution,
    ) -> Result<(), FlagbindError> {
        let Some(value) = &resolution.value else {
            return Ok(());
        };
        let slot = record
            .slot(self.field)
            .ok_or_else(|| FlagbindError::FieldWrite {
                record: self.record,
                field: self.field,
                reason: "no accessor for field".to_string(),
            })?;
        slot.set(value.clone())
            .map_err(|reason| FlagbindError::FieldWrite {
                record: self.record,
                field: self.field,
                reason,
            })
    }
}
