//! Closed set of bindable field kinds, their typed values, and value origins.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::grammar;

/// The seven primitive kinds a field can be bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Int,
    Int64,
    Uint64,
    Float64,
    Bool,
    Duration,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::String,
        Kind::Int,
        Kind::Int64,
        Kind::Uint64,
        Kind::Float64,
        Kind::Bool,
        Kind::Duration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
            Kind::Duration => "duration",
        }
    }

    /// Parse text under this kind's grammar.
    ///
    /// The error is a short human-readable reason; callers attach the flag name
    /// and offending text.
    pub fn parse(self, text: &str) -> Result<Value, String> {
        match self {
            Kind::String => Ok(Value::String(text.to_string())),
            Kind::Int => grammar::parse_int(text).map(Value::Int),
            Kind::Int64 => grammar::parse_int64(text).map(Value::Int64),
            Kind::Uint64 => grammar::parse_uint64(text).map(Value::Uint64),
            Kind::Float64 => grammar::parse_float(text).map(Value::Float64),
            Kind::Bool => grammar::parse_bool(text).map(Value::Bool),
            Kind::Duration => grammar::parse_duration(text).map(Value::Duration),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value of one of the seven kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(isize),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    Duration(Duration),
}

impl Value {
    /// The zero value for `kind`: empty string, `0`, `false`, or a zero duration.
    pub fn zero(kind: Kind) -> Self {
        match kind {
            Kind::String => Value::String(String::new()),
            Kind::Int => Value::Int(0),
            Kind::Int64 => Value::Int64(0),
            Kind::Uint64 => Value::Uint64(0),
            Kind::Float64 => Value::Float64(0.0),
            Kind::Bool => Value::Bool(false),
            Kind::Duration => Value::Duration(Duration::ZERO),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
            Value::Duration(_) => Kind::Duration,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Int64(i) => write!(f, "{i}"),
            Value::Uint64(u) => write!(f, "{u}"),
            Value::Float64(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Duration(d) => f.write_str(&grammar::format_duration(*d)),
        }
    }
}

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// Explicitly passed on the command line.
    CommandLine,
    /// Read from an environment variable named after the flag.
    Environment,
    /// The field's declared default.
    Default,
    /// Nothing applied; the field kept its pre-load value.
    Untouched,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::CommandLine => "command line",
            Source::Environment => "environment",
            Source::Default => "default",
            Source::Untouched => "untouched",
        })
    }
}

/// The external input that supplied an unparseable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    CommandLine,
    Environment,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputSource::CommandLine => "command line",
            InputSource::Environment => "environment",
        })
    }
}
