use std::collections::HashMap;
use std::ffi::OsString;

use tracing::debug;

/// Snapshot of environment variables used as the fallback between an
/// explicit flag and a declared default.
///
/// The variable for a flag is its external name, optionally behind a prefix:
/// with prefix `MYAPP_`, flag `Port` reads `MYAPP_Port`. Names are matched
/// exactly, with no case folding.
///
/// Built from an iterator so tests can pass synthetic data instead of
/// `std::env::vars_os()`.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
    prefix: String,
    enabled: bool,
}

impl Env {
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
            prefix: String::new(),
            enabled: true,
        }
    }

    /// Like [`from_vars`](Self::from_vars), but skips pairs whose name or
    /// value is not valid UTF-8. No flag can name such a variable.
    pub fn from_vars_os(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self::from_vars(vars.into_iter().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    debug!(key = ?key, "skipping non UTF-8 environment variable");
                    None
                }
            }
        }))
    }

    /// An environment that never yields a value.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn var_name(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Look up the variable for flag `name`. Present-but-empty counts as present.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.vars.get(&self.var_name(name)).map(String::as_str)
    }
}
