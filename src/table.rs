//! Named flag table: deduplicates flag registration by external name.
//!
//! The first field to claim a name creates the handle; later claimants with
//! the same kind reuse it. A claimant with a different kind is a conflict.

use std::collections::HashMap;

use tracing::debug;

use crate::error::FlagbindError;
use crate::flag::Flag;
use crate::types::Kind;

/// Index of a registered flag inside its [`FlagTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagId(usize);

/// One registered flag: name, help text, and the shared handle.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub description: String,
    pub flag: Flag,
}

#[derive(Debug, Default)]
pub struct FlagTable {
    entries: Vec<Entry>,
    index: HashMap<String, FlagId>,
}

impl FlagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `name`, registering it on first sight.
    ///
    /// The description of the first registration is kept.
    pub fn get_or_register(
        &mut self,
        name: &str,
        kind: Kind,
        description: &str,
    ) -> Result<FlagId, FlagbindError> {
        if let Some(&id) = self.index.get(name) {
            let registered = self.entries[id.0].flag.kind();
            if registered != kind {
                return Err(FlagbindError::ConflictingFlagType {
                    name: name.to_string(),
                    registered,
                    requested: kind,
                });
            }
            debug!(flag = name, %kind, "reusing registered flag");
            return Ok(id);
        }

        validate_name(name)?;
        let id = FlagId(self.entries.len());
        self.entries.push(Entry {
            name: name.to_string(),
            description: description.to_string(),
            flag: Flag::new(kind),
        });
        self.index.insert(name.to_string(), id);
        debug!(flag = name, %kind, "registered flag");
        Ok(id)
    }

    pub fn flag(&self, id: FlagId) -> &Flag {
        &self.entries[id.0].flag
    }

    pub fn flag_mut(&mut self, id: FlagId) -> &mut Flag {
        &mut self.entries[id.0].flag
    }

    pub fn lookup(&self, name: &str) -> Option<FlagId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), FlagbindError> {
    if name.is_empty()
        || name.starts_with('-')
        || name.contains('=')
        || name.chars().any(char::is_whitespace)
    {
        return Err(FlagbindError::InvalidFlagName {
            name: name.to_string(),
        });
    }
    Ok(())
}
