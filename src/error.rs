use thiserror::Error;

use crate::types::{InputSource, Kind};

/// Boxed error returned by a record's `validate` hook.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FlagbindError {
    #[error("Flags were already parsed by this loader")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagbind::already_parsed),
            help("build a new loader with Flagbind::builder() for each load")
        )
    )]
    AlreadyParsed,

    #[error("Loader is spent after a failed load")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagbind::spent),
            help("build a new loader with Flagbind::builder()")
        )
    )]
    Spent,

    #[error("Invalid default '{text}' for {kind} flag '{name}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::invalid_default)))]
    InvalidDefault {
        name: String,
        text: String,
        kind: Kind,
        reason: String,
    },

    #[error("Unsupported type {type_name} for field '{field}' of {record}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagbind::unsupported_type),
            help("supported kinds: string, int, int64, uint64, float64, bool, duration")
        )
    )]
    UnsupportedType {
        record: &'static str,
        field: &'static str,
        type_name: &'static str,
    },

    #[error("Flag '{name}' is already registered as {registered}, cannot rebind it as {requested}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::conflicting_flag_type)))]
    ConflictingFlagType {
        name: String,
        registered: Kind,
        requested: Kind,
    },

    #[error("Invalid flag name '{name}'")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagbind::invalid_flag_name),
            help(
                "flag names must be non-empty, must not start with '-', \
                 and must not contain '=' or whitespace"
            )
        )
    )]
    InvalidFlagName { name: String },

    #[error("Field '{field}' of {record} is declared but has no accessor")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::unknown_field)))]
    UnknownField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Invalid value '{text}' for {kind} flag '{name}' from {input}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::invalid_input)))]
    InvalidExternalInput {
        name: String,
        text: String,
        kind: Kind,
        input: InputSource,
        reason: String,
    },

    #[error("{0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::command_line)))]
    CommandLine(#[from] clap::Error),

    #[error("Validation failed for {record}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::validation_failed)))]
    ValidationFailed {
        record: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Failed to write field '{field}' of {record}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::field_write)))]
    FieldWrite {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Failed to serialize report: {0}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagbind::report)))]
    Report(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_default_formats_correctly() {
        let err = FlagbindError::InvalidDefault {
            name: "Port".into(),
            text: "80x".into(),
            kind: Kind::Int,
            reason: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Port"));
        assert!(msg.contains("80x"));
        assert!(msg.contains("int"));
    }

    #[test]
    fn invalid_input_names_its_source() {
        let err = FlagbindError::InvalidExternalInput {
            name: "Timeout".into(),
            text: "soon".into(),
            kind: Kind::Duration,
            input: InputSource::Environment,
            reason: "missing unit".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("environment"));
        assert!(msg.contains("duration"));
        assert!(msg.contains("soon"));
    }

    #[test]
    fn conflicting_flag_type_formats() {
        let err = FlagbindError::ConflictingFlagType {
            name: "Port".into(),
            registered: Kind::Int,
            requested: Kind::String,
        };
        let msg = err.to_string();
        assert!(msg.contains("int"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn validation_failed_keeps_source() {
        let err = FlagbindError::ValidationFailed {
            record: "ServerConfig",
            source: "port must be >= 1024".into(),
        };
        assert!(err.to_string().contains("port must be >= 1024"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
