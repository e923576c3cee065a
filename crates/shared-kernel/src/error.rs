use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NoteStatError {
    /// 元のエラーを source に保ったまま説明を付ける
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<NoteStatError>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

pub type Result<T> = std::result::Result<T, NoteStatError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A counter collection failed validation.
    #[error("Invalid counter configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Missing or out-of-range parameter for a parameterised counter.
    #[error("Invalid parameter for property '{property}': {reason}")]
    InvalidParameter { property: String, reason: String },

    /// Only reachable through string lookups; the enum itself is closed.
    #[error("Unknown counter type: {name}")]
    UnknownCounterType { name: String },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Settings are invalid: {reason}")]
    SettingsInvalid { reason: String },
}

#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// The document body could not be read; aborts that document only.
    #[error("Content unavailable for '{document}': {reason}")]
    ContentUnavailable { document: String, reason: String },

    /// A single property write failed; sibling counters continue.
    #[error("Failed to write property '{property}' on '{document}': {reason}")]
    PropertyWriteFailed {
        document: String,
        property: String,
        reason: String,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {format} data: {details}")]
    SerializationError { format: &'static str, details: String },

    #[error("Could not list documents under '{root}': {details}")]
    WalkError { root: PathBuf, details: String },

    #[error("Watch error: {details}")]
    WatchError { details: String },

    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

/// `From` for a foreign error, both into `InfrastructureError` and the root type.
macro_rules! infrastructure_from {
    ($ty:ty => |$err:ident| $body:expr) => {
        impl From<$ty> for InfrastructureError {
            fn from($err: $ty) -> Self {
                $body
            }
        }

        impl From<$ty> for NoteStatError {
            fn from(err: $ty) -> Self {
                InfrastructureError::from(err).into()
            }
        }
    };
}

impl From<std::io::Error> for NoteStatError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::Io(err).into()
    }
}

infrastructure_from!(serde_json::Error => |err| InfrastructureError::SerializationError {
    format: "JSON",
    details: err.to_string(),
});

infrastructure_from!(serde_yaml::Error => |err| InfrastructureError::SerializationError {
    format: "YAML",
    details: err.to_string(),
});

/// `anyhow` 風に Result へ説明を積む
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

fn wrap(context: String, source: NoteStatError) -> NoteStatError {
    NoteStatError::Context { context, source: Box::new(source) }
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<NoteStatError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| wrap(context.into(), err.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| wrap(f(), err.into()))
    }
}
