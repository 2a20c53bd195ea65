//! Clap adapter: the command-line facility behind the flag table.
//!
//! Each registered name becomes exactly one `clap::Arg`, built at parse time
//! from the [`FlagTable`]. Clap only delivers raw text; the table's handles
//! parse it under their own grammar.
//!
//! Accepted forms, for a flag named `Port`:
//!
//! - `--Port=9090`, `--Port 9090`
//! - `-Port=9090`, `-Port 9090` (single-dash long form, rewritten before
//!   clap sees it; rewriting stops at `--` and at the first positional)
//! - bool flags: bare `--Debug` means true, a value needs `=` (`--Debug=false`)
//!
//! A repeated flag keeps its last value. Arguments after the first
//! positional are collected verbatim and returned to the caller.

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};

use crate::error::FlagbindError;
use crate::table::{Entry, FlagTable};
use crate::types::{InputSource, Kind};

// Contains a space, so no valid flag name can collide with it.
const POSITIONAL: &str = "flagbind positional";

/// Build the clap command for every flag in `table`.
pub fn command(table: &FlagTable, bin_name: &str) -> Command {
    let mut cmd = Command::new(bin_name.to_string())
        .args_override_self(true)
        .disable_help_flag(table.contains("help"))
        .arg(
            Arg::new(POSITIONAL)
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .hide(true),
        );
    for entry in table.entries() {
        cmd = cmd.arg(flag_arg(entry));
    }
    cmd
}

fn flag_arg(entry: &Entry) -> Arg {
    let kind = entry.flag.kind();
    let arg = Arg::new(entry.name.clone())
        .long(entry.name.clone())
        .help(entry.description.clone())
        .value_name(kind.as_str().to_uppercase())
        .action(ArgAction::Set);

    match kind {
        Kind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        _ => arg.num_args(1).allow_hyphen_values(true),
    }
}

/// Parse `args` (program name first) into the table's handles.
///
/// Returns the positional arguments left after the flags.
pub fn parse(
    table: &mut FlagTable,
    bin_name: &str,
    args: &[OsString],
) -> Result<Vec<String>, FlagbindError> {
    let args = normalize(table, args);
    let matches = command(table, bin_name).try_get_matches_from(args)?;

    for entry in table.entries_mut() {
        if matches.value_source(&entry.name) != Some(ValueSource::CommandLine) {
            continue;
        }
        let Some(text) = matches.get_one::<String>(&entry.name) else {
            continue;
        };
        entry
            .flag
            .set_from_text(text)
            .map_err(|reason| FlagbindError::InvalidExternalInput {
                name: entry.name.clone(),
                text: text.clone(),
                kind: entry.flag.kind(),
                input: InputSource::CommandLine,
                reason,
            })?;
    }

    Ok(matches
        .get_many::<String>(POSITIONAL)
        .map(|values| values.cloned().collect())
        .unwrap_or_default())
}

/// Rewrite single-dash long flags to the double-dash form clap expects.
///
/// Only tokens naming a registered flag are rewritten, so `-h` and unknown
/// flags reach clap unchanged. A token that is the value of the preceding
/// flag is never rewritten.
fn normalize(table: &FlagTable, args: &[OsString]) -> Vec<OsString> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    if let Some(bin) = iter.next() {
        out.push(bin.clone());
    }

    let mut expect_value = false;
    let mut done = false;
    for arg in iter {
        if done || expect_value {
            expect_value = false;
            out.push(arg.clone());
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg.clone());
            continue;
        };
        if text == "--" {
            done = true;
            out.push(arg.clone());
            continue;
        }
        let Some(body) = text.strip_prefix('-') else {
            done = true;
            out.push(arg.clone());
            continue;
        };
        let body = body.strip_prefix('-').unwrap_or(body);
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        match table.lookup(name) {
            Some(id) => {
                expect_value = !inline_value && table.flag(id).kind() != Kind::Bool;
                out.push(OsString::from(format!("--{body}")));
            }
            None => out.push(arg.clone()),
        }
    }
    out
}
