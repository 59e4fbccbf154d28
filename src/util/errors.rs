use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StdError {
    #[error("YamlDecodingError: {0}")]
    YamlDecodingError(#[source] serde_yaml::Error),

    #[error("JsonSerializationError: {0}")]
    JsonSerializationError(#[source] serde_json::Error),

    #[error("Kube Error: {0}")]
    KubeError(#[source] kube::Error),

    #[error("IoError: {0}")]
    IoError(#[source] std::io::Error),

    #[error("CommandError: {0}")]
    CommandError(String),

    #[error("CommandTimeout: `{command}` did not finish within {}s", .timeout.as_secs_f64())]
    CommandTimeout { command: String, timeout: Duration },

    #[error("MetadataMissing: {0}")]
    MetadataMissing(String),
}

impl StdError {
    pub fn label(&self) -> &'static str {
        match self {
            StdError::YamlDecodingError(_) => "yamldecodingerror",
            StdError::JsonSerializationError(_) => "jsonserializationerror",
            StdError::KubeError(_) => "kubeerror",
            StdError::IoError(_) => "ioerror",
            StdError::CommandError(_) => "commanderror",
            StdError::CommandTimeout { .. } => "commandtimeout",
            StdError::MetadataMissing(_) => "metadatamissing",
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Standard Error: {0}")]
    StdError(#[source] StdError),

    /// The BuildConfig exists but does not build from a Git source.
    #[error("BuildConfig '{0}' does not use Git source")]
    NotGitSource(String),

    /// Module arguments failed validation. The message is shown to the operator verbatim.
    #[error("{0}")]
    ArgumentError(String),
}

impl Error {
    pub fn label(&self) -> &'static str {
        match self {
            Error::StdError(e) => e.label(),
            Error::NotGitSource(_) => "notgitsource",
            Error::ArgumentError(_) => "argumenterror",
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
