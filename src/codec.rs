//! Scalar codec registry: turn a field's declared kind and metadata into a
//! [`Binding`], creating or reusing the flag handle for its external name.
//!
//! Declared defaults are parsed here, while the load is being built, so a bad
//! default fails before any external input is read.

use crate::binding::Binding;
use crate::error::FlagbindError;
use crate::record::{FieldSpec, Slot};
use crate::table::FlagTable;

/// Build the binding for one non-skipped field.
///
/// The default is parsed before the name is claimed, so a field with a
/// malformed default never registers a flag.
pub fn bind(
    table: &mut FlagTable,
    record: &'static str,
    spec: &FieldSpec,
    slot: &Slot<'_>,
) -> Result<Binding, FlagbindError> {
    let kind = slot
        .kind()
        .map_err(|type_name| FlagbindError::UnsupportedType {
            record,
            field: spec.field(),
            type_name,
        })?;
    let name = spec.external_name();

    let default = match spec.default_text() {
        Some(text) => Some(kind.parse(text).map_err(|reason| {
            FlagbindError::InvalidDefault {
                name: name.to_string(),
                text: text.to_string(),
                kind,
                reason,
            }
        })?),
        None => None,
    };

    let flag = table.get_or_register(name, kind, spec.description())?;
    Ok(Binding::new(record, spec.field(), name, kind, flag, default))
}
