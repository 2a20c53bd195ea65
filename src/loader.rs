//! Load orchestration.
//!
//! One load runs four phases over an ordered list of records:
//!
//! 1. **Build**: every non-skipped field of every record gets a binding. The
//!    first bad default, unsupported type, or name conflict aborts before
//!    anything is parsed or written.
//! 2. **Parse**: the command line is parsed once into the flag table.
//! 3. **Apply**: per record, bindings resolve and write in declaration order.
//! 4. **Hooks**: right after its own bindings, each record is validated and
//!    then initialized.
//!
//! A failure in apply or hooks leaves earlier writes in place.

use std::ffi::OsString;

use tracing::debug;

use crate::binding::{Binding, Resolution};
use crate::cli;
use crate::codec;
use crate::env::Env;
use crate::error::FlagbindError;
use crate::record::Record;
use crate::report::{Report, ResolvedField};
use crate::table::FlagTable;

/// Where a [`Loader`] is in its lifecycle. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Building,
    Parsed,
    Applying,
    Hooks,
    Done,
    Failed,
}

/// Owns the flag table and external inputs for exactly one load.
///
/// Created by [`FlagbindBuilder::build`](crate::FlagbindBuilder::build).
#[derive(Debug)]
pub struct Loader {
    bin_name: String,
    args: Vec<OsString>,
    env: Env,
    table: FlagTable,
    phase: Phase,
    parsed: bool,
}

impl Loader {
    pub(crate) fn new(bin_name: String, args: Vec<OsString>, env: Env) -> Self {
        Self {
            bin_name,
            args,
            env,
            table: FlagTable::new(),
            phase: Phase::Idle,
            parsed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn table(&self) -> &FlagTable {
        &self.table
    }

    /// Clap's help text for every flag registered so far.
    pub fn render_help(&self) -> String {
        cli::command(&self.table, &self.bin_name)
            .render_help()
            .to_string()
    }

    /// Bind, parse, apply, and run hooks for `records`, in order.
    ///
    /// A loader parses at most once: calling `load` again returns
    /// [`FlagbindError::AlreadyParsed`], or [`FlagbindError::Spent`] if the
    /// first call failed before reaching the command line.
    pub fn load(&mut self, records: &mut [&mut dyn Record]) -> Result<Report, FlagbindError> {
        if self.phase != Phase::Idle {
            return Err(if self.parsed {
                FlagbindError::AlreadyParsed
            } else {
                FlagbindError::Spent
            });
        }

        let result = self.run(records);
        match &result {
            Ok(_) => self.enter(Phase::Done),
            Err(err) => {
                debug!(error = %err, "load failed");
                self.enter(Phase::Failed);
            }
        }
        result
    }

    fn run(&mut self, records: &mut [&mut dyn Record]) -> Result<Report, FlagbindError> {
        self.enter(Phase::Building);
        let mut bindings = Vec::with_capacity(records.len());
        for record in records.iter_mut() {
            bindings.push(self.build_record(&mut **record)?);
        }

        self.parsed = true;
        let positional = cli::parse(&mut self.table, &self.bin_name, &self.args)?;
        self.enter(Phase::Parsed);

        let mut report = Report::new(positional);
        for (record, record_bindings) in records.iter_mut().zip(&bindings) {
            let name = record.record_name();

            self.enter(Phase::Applying);
            for binding in record_bindings {
                let resolution = binding.resolve(&self.table, &self.env)?;
                binding.apply(&mut **record, &resolution)?;
                report.push(resolved_field(&mut **record, binding, &resolution));
            }

            self.enter(Phase::Hooks);
            record
                .validate()
                .map_err(|source| FlagbindError::ValidationFailed {
                    record: name,
                    source,
                })?;
            record.initialize();
            debug!(record = name, "record loaded");
        }
        Ok(report)
    }

    fn build_record(&mut self, record: &mut dyn Record) -> Result<Vec<Binding>, FlagbindError> {
        let name = record.record_name();
        let mut bindings = Vec::new();
        for spec in record.fields() {
            if spec.is_skipped() {
                continue;
            }
            let slot = record
                .slot(spec.field())
                .ok_or(FlagbindError::UnknownField {
                    record: name,
                    field: spec.field(),
                })?;
            bindings.push(codec::bind(&mut self.table, name, &spec, &slot)?);
        }
        debug!(record = name, fields = bindings.len(), "built bindings");
        Ok(bindings)
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "loader phase");
        self.phase = phase;
    }
}

fn resolved_field(
    record: &mut dyn Record,
    binding: &Binding,
    resolution: &Resolution,
) -> ResolvedField {
    let value = match &resolution.value {
        Some(value) => value.to_string(),
        None => record
            .slot(binding.field())
            .and_then(|slot| slot.get())
            .map(|value| value.to_string())
            .unwrap_or_default(),
    };
    ResolvedField {
        name: binding.name().to_string(),
        record: binding.record(),
        field: binding.field(),
        kind: binding.kind(),
        value,
        source: resolution.source,
    }
}
