use std::ffi::OsString;
use std::path::Path;

use crate::env::Env;
use crate::error::FlagbindError;
use crate::loader::Loader;
use crate::record::Record;
use crate::report::Report;

/// Entry point for building a flagbind loader.
pub struct Flagbind;

impl Flagbind {
    pub fn builder() -> FlagbindBuilder {
        FlagbindBuilder::new()
    }
}

/// Builder for a [`Loader`]: where arguments and environment come from.
///
/// Nothing here touches process state until [`build()`](Self::build), and
/// only for inputs that were not supplied explicitly.
#[derive(Debug, Clone)]
pub struct FlagbindBuilder {
    app_name: Option<String>,
    args: Option<Vec<OsString>>,
    env_vars: Option<Vec<(String, String)>>,
    env_prefix: Option<String>,
    env_enabled: bool,
}

impl FlagbindBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            args: None,
            env_vars: None,
            env_prefix: None,
            env_enabled: true,
        }
    }

    /// Program name shown in usage and help (default: file name of the first
    /// argument).
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Command-line arguments, program name first (default:
    /// `std::env::args_os()`).
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Environment variables to consult (default: the process environment,
    /// minus variables that are not valid UTF-8).
    pub fn env_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env_vars = Some(vars.into_iter().collect());
        self
    }

    /// Prepend `prefix` to a flag name to form its environment variable.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable the environment fallback entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    fn effective_args(&self) -> Vec<OsString> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os().collect(),
        }
    }

    fn effective_app_name(&self, args: &[OsString]) -> String {
        if let Some(name) = &self.app_name {
            return name.clone();
        }
        args.first()
            .and_then(|arg0| Path::new(arg0).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }

    fn effective_env(&self) -> Env {
        if !self.env_enabled {
            return Env::disabled();
        }
        let env = match &self.env_vars {
            Some(vars) => Env::from_vars(vars.clone()),
            None => Env::from_vars_os(std::env::vars_os()),
        };
        match &self.env_prefix {
            Some(prefix) => env.with_prefix(prefix),
            None => env,
        }
    }

    pub fn build(self) -> Loader {
        let args = self.effective_args();
        let app_name = self.effective_app_name(&args);
        let env = self.effective_env();
        Loader::new(app_name, args, env)
    }

    /// Build a loader and run its single load.
    pub fn load(self, records: &mut [&mut dyn Record]) -> Result<Report, FlagbindError> {
        self.build().load(records)
    }
}
