//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Token name classified more than once in the same format string
    #[error("Duplicate token '{token}' in format string")]
    DuplicateToken { token: String },

    /// Override marker on a token that is not reserved
    #[error("Illegal override marker on non-reserved token '{token}'")]
    IllegalOverride { token: String },

    /// Dynamic marker on a reserved token without the override marker
    #[error("Illegal dynamic marker on reserved token '{token}': override marker required")]
    IllegalDynamicMarker { token: String },

    /// Placeholder delimiters with no token name between them
    #[error("Empty token name in format string")]
    EmptyTokenName,

    /// Token with no bound value at classification or dispatch time
    #[error("No value bound for token '{token}'")]
    MissingParameterBinding { token: String },

    /// Format string without a MESSAGE placeholder
    #[error("Format string does not contain a MESSAGE placeholder")]
    MissingMessageToken,

    /// Reserved name bound as an ordinary parameter
    #[error("Reserved token '{token}' cannot be bound as an ordinary parameter")]
    ReservedNameMisuse { token: String },

    /// Format index outside the configured format list
    #[error("Format index {index} out of range for {count} configured format(s)")]
    BadFormatIndex { index: usize, count: usize },

    /// Sink write failure with sink name
    #[error("Sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a duplicate token error
    pub fn duplicate_token(token: impl Into<String>) -> Self {
        LoggerError::DuplicateToken {
            token: token.into(),
        }
    }

    /// Create an illegal override error
    pub fn illegal_override(token: impl Into<String>) -> Self {
        LoggerError::IllegalOverride {
            token: token.into(),
        }
    }

    /// Create an illegal dynamic marker error
    pub fn illegal_dynamic_marker(token: impl Into<String>) -> Self {
        LoggerError::IllegalDynamicMarker {
            token: token.into(),
        }
    }

    /// Create a missing parameter binding error
    pub fn missing_binding(token: impl Into<String>) -> Self {
        LoggerError::MissingParameterBinding {
            token: token.into(),
        }
    }

    /// Create a reserved name misuse error
    pub fn reserved_misuse(token: impl Into<String>) -> Self {
        LoggerError::ReservedNameMisuse {
            token: token.into(),
        }
    }

    /// Create a bad format index error
    pub fn bad_index(index: usize, count: usize) -> Self {
        LoggerError::BadFormatIndex { index, count }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }
}
