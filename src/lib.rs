//! Bind fields of plain configuration structs to command-line flags and
//! environment variables, with declared defaults and a fixed precedence.
//!
//! ```ignore
//! let mut server = ServerConfig::default();
//! let mut db = DbConfig::default();
//!
//! Flagbind::builder()
//!     .app_name("myapp")
//!     .load(&mut [&mut server, &mut db])?;
//! ```
//!
//! That one call registers one flag per field, parses `std::env::args_os()`
//! once, falls back to environment variables and declared defaults, writes
//! each field, and then runs each record's `validate` and `initialize` hooks.
//!
//! # Records
//!
//! A record is any struct implementing [`Record`]. It describes its fields
//! with [`FieldSpec`] (external name, default text, description, skip marker)
//! and hands out a [`Slot`] for each bound field. Seven field kinds are
//! supported:
//!
//! | Rust type | Kind |
//! |-----------|------|
//! | `String` | `string` |
//! | `isize` | `int` |
//! | `i64` | `int64` |
//! | `u64` | `uint64` |
//! | `f64` | `float64` |
//! | `bool` | `bool` |
//! | `std::time::Duration` | `duration` |
//!
//! Anything else is reported as [`FlagbindError::UnsupportedType`] through
//! [`Slot::unsupported`].
//!
//! # Precedence
//!
//! ```text
//! Pre-load value        whatever the field held before loading
//!        ↑ overridden by
//! Declared default      FieldSpec::default("8080")
//!        ↑ overridden by
//! Environment           variable named after the flag (optionally prefixed)
//!        ↑ overridden by
//! Command line          -Port=9090, --Port 9090
//! ```
//!
//! Defaults are parsed when the load is built, before any input is read, so
//! a typo in a default fails fast with [`FlagbindError::InvalidDefault`].
//!
//! # Shared flags
//!
//! Fields in different records may declare the same external name. The name
//! is registered once and every such field reads the same command-line value.
//! Each field keeps its own default. Declaring one name with two different
//! kinds is an error ([`FlagbindError::ConflictingFlagType`]).
//!
//! # Hooks
//!
//! After a record's own fields are written, [`Record::validate`] runs; an
//! error aborts the load and later records are left alone. Then
//! [`Record::initialize`] runs, which is where skipped fields are usually
//! derived from resolved ones.
//!
//! # One parse per loader
//!
//! A [`Loader`] owns its flag table; nothing is global, so independent
//! loaders (for example in tests) never share flags. A loader parses the
//! command line at most once, and a second [`Loader::load`] returns
//! [`FlagbindError::AlreadyParsed`].
//!
//! # Error handling
//!
//! Every fallible operation returns [`FlagbindError`]. Errors carry the flag
//! name, the offending text, and the declared kind. Enable the `rich-errors`
//! feature for `miette` diagnostics.

pub mod error;
pub mod types;

mod binding;
mod builder;
mod cli;
mod codec;
mod env;
mod flag;
mod grammar;
mod loader;
mod record;
mod report;
mod table;

#[cfg(test)]
mod fixtures;

pub use binding::{Binding, Resolution};
pub use builder::{Flagbind, FlagbindBuilder};
pub use error::{BoxError, FlagbindError};
pub use flag::Flag;
pub use loader::{Loader, Phase};
pub use record::{FieldSpec, Record, Slot};
pub use report::{Report, ResolvedField};
pub use table::{Entry, FlagId, FlagTable};
pub use types::{InputSource, Kind, Source, Value};
