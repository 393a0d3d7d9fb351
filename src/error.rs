use thiserror::Error;

/// Typed failures surfaced through `anyhow::Error`.
///
/// Callers that need to branch on a condition can downcast:
/// ```
/// # use ons_rs::OnsError;
/// let err: anyhow::Error = OnsError::DatasetNotFound { name: "zzz".into() }.into();
/// assert!(matches!(err.downcast_ref::<OnsError>(), Some(OnsError::DatasetNotFound { .. })));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OnsError {
    /// No catalog entry's title contains the requested name.
    #[error("no dataset found containing '{name}'")]
    DatasetNotFound { name: String },

    /// A field the pipeline cannot proceed without was absent from a payload.
    #[error("{what}: missing required field `{field}`")]
    MissingField { what: String, field: &'static str },

    /// The API answered with a non-success status.
    #[error("request failed with HTTP {status}: {url}")]
    Http { status: u16, url: String },
}
