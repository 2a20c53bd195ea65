//! The record side of binding: per-field metadata, field accessors, and the
//! [`Record`] trait a configuration struct implements.
//!
//! ```ignore
//! struct ServerConfig {
//!     port: isize,
//!     timeout: Duration,
//!     addr: String,
//! }
//!
//! impl Record for ServerConfig {
//!     fn fields(&self) -> Vec<FieldSpec> {
//!         vec![
//!             FieldSpec::new("port").name("Port").default("8080"),
//!             FieldSpec::new("timeout").name("Timeout").default("2s"),
//!             FieldSpec::new("addr").skip(),
//!         ]
//!     }
//!
//!     fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
//!         match field {
//!             "port" => Some((&mut self.port).into()),
//!             "timeout" => Some((&mut self.timeout).into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn initialize(&mut self) {
//!         self.addr = format!("0.0.0.0:{}", self.port);
//!     }
//! }
//! ```

use std::time::Duration;

use crate::error::BoxError;
use crate::types::{Kind, Value};

/// Declarative metadata for one field.
///
/// Every attribute is optional: the external name falls back to the field
/// name, the description to the external name. An absent default and an
/// empty default are different things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    field: &'static str,
    name: Option<&'static str>,
    default: Option<&'static str>,
    description: Option<&'static str>,
    skip: bool,
}

impl FieldSpec {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            name: None,
            default: None,
            description: None,
            skip: false,
        }
    }

    /// Expose the field under a different flag and environment name.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Declared default, parsed under the field's kind when the load is built.
    pub fn default(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    pub fn desc(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Exclude the field from binding. It can still be set in
    /// [`Record::initialize`].
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn external_name(&self) -> &'static str {
        self.name.unwrap_or(self.field)
    }

    pub fn default_text(&self) -> Option<&'static str> {
        self.default
    }

    pub fn description(&self) -> &'static str {
        self.description.unwrap_or_else(|| self.external_name())
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }
}

/// Mutable access to one field of a record.
#[derive(Debug)]
pub enum Slot<'a> {
    String(&'a mut String),
    Int(&'a mut isize),
    Int64(&'a mut i64),
    Uint64(&'a mut u64),
    Float64(&'a mut f64),
    Bool(&'a mut bool),
    Duration(&'a mut Duration),
    /// A field whose type has no codec. Carries the type name for errors.
    Unsupported(&'static str),
}

impl Slot<'_> {
    pub fn unsupported<T: ?Sized>() -> Self {
        Slot::Unsupported(std::any::type_name::<T>())
    }

    /// The field's kind, or the unsupported type's name.
    pub fn kind(&self) -> Result<Kind, &'static str> {
        Ok(match self {
            Slot::String(_) => Kind::String,
            Slot::Int(_) => Kind::Int,
            Slot::Int64(_) => Kind::Int64,
            Slot::Uint64(_) => Kind::Uint64,
            Slot::Float64(_) => Kind::Float64,
            Slot::Bool(_) => Kind::Bool,
            Slot::Duration(_) => Kind::Duration,
            Slot::Unsupported(type_name) => return Err(type_name),
        })
    }

    /// Current value of the field.
    pub fn get(&self) -> Option<Value> {
        Some(match self {
            Slot::String(s) => Value::String((**s).clone()),
            Slot::Int(i) => Value::Int(**i),
            Slot::Int64(i) => Value::Int64(**i),
            Slot::Uint64(u) => Value::Uint64(**u),
            Slot::Float64(x) => Value::Float64(**x),
            Slot::Bool(b) => Value::Bool(**b),
            Slot::Duration(d) => Value::Duration(**d),
            Slot::Unsupported(_) => return None,
        })
    }

    /// Write `value` into the field. The value's kind must match the slot's.
    pub fn set(self, value: Value) -> Result<(), String> {
        match (self, value) {
            (Slot::String(slot), Value::String(v)) => *slot = v,
            (Slot::Int(slot), Value::Int(v)) => *slot = v,
            (Slot::Int64(slot), Value::Int64(v)) => *slot = v,
            (Slot::Uint64(slot), Value::Uint64(v)) => *slot = v,
            (Slot::Float64(slot), Value::Float64(v)) => *slot = v,
            (Slot::Bool(slot), Value::Bool(v)) => *slot = v,
            (Slot::Duration(slot), Value::Duration(v)) => *slot = v,
            (slot, value) => {
                let found = match slot.kind() {
                    Ok(kind) => kind.as_str(),
                    Err(type_name) => type_name,
                };
                return Err(format!(
                    "expected a {found} field, got a {} value",
                    value.kind()
                ));
            }
        }
        Ok(())
    }
}

macro_rules! slot_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Slot<'a> {
                fn from(field: &'a mut $ty) -> Self {
                    Slot::$variant(field)
                }
            }
        )*
    };
}

slot_from! {
    String => String,
    isize => Int,
    i64 => Int64,
    u64 => Uint64,
    f64 => Float64,
    bool => Bool,
    Duration => Duration,
}

/// A configuration record whose fields can be bound to flags.
///
/// `fields` lists metadata in declaration order; `slot` hands out access to a
/// field by its declared name. The hooks are optional and run after the
/// record's own fields are applied: `validate` first, then `initialize`.
pub trait Record {
    fn fields(&self) -> Vec<FieldSpec>;

    fn slot(&mut self, field: &str) -> Option<Slot<'_>>;

    /// Reject a fully resolved record. An error aborts the load.
    fn validate(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Derive skipped fields from resolved ones. Runs only after a
    /// successful validation.
    fn initialize(&mut self) {}

    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_defaults_fall_back() {
        let spec = FieldSpec::new("port");
        assert_eq!(spec.external_name(), "port");
        assert_eq!(spec.description(), "port");
        assert_eq!(spec.default_text(), None);
        assert!(!spec.is_skipped());
    }

    #[test]
    fn spec_description_falls_back_to_external_name() {
        let spec = FieldSpec::new("port").name("Port");
        assert_eq!(spec.external_name(), "Port");
        assert_eq!(spec.description(), "Port");
        assert_eq!(spec.field(), "port");
    }

    #[test]
    fn empty_default_is_still_a_default() {
        let spec = FieldSpec::new("name").default("");
        assert_eq!(spec.default_text(), Some(""));
    }

    #[test]
    fn slot_reports_kind() {
        let mut port: isize = 0;
        let mut timeout = Duration::ZERO;
        assert_eq!(Slot::from(&mut port).kind(), Ok(Kind::Int));
        assert_eq!(Slot::from(&mut timeout).kind(), Ok(Kind::Duration));
        assert_eq!(
            Slot::unsupported::<Vec<String>>().kind(),
            Err(std::any::type_name::<Vec<String>>())
        );
    }

    #[test]
    fn slot_set_writes_matching_kind() {
        let mut name = String::from("A");
        Slot::from(&mut name)
            .set(Value::String("B".into()))
            .unwrap();
        assert_eq!(name, "B");
    }

    #[test]
    fn slot_set_rejects_mismatched_kind() {
        let mut port: u64 = 1;
        let err = Slot::from(&mut port)
            .set(Value::String("x".into()))
            .unwrap_err();
        assert!(err.contains("uint64"));
        assert_eq!(port, 1);
    }

    #[test]
    fn slot_get_reads_current_value() {
        let mut ratio = 0.5;
        assert_eq!(Slot::from(&mut ratio).get(), Some(Value::Float64(0.5)));
        assert_eq!(Slot::unsupported::<char>().get(), None);
    }
}
