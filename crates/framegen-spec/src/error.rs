use thiserror::Error as ThisError;

///
/// SpecError
///
/// Raised when the protocol description is malformed. Every variant is
/// fatal for a generation run.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SpecError {
    #[error("cannot read protocol description: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed protocol description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field '{field}' declares neither a type nor a domain")]
    MissingDomain { field: String },

    #[error("class '{class}' declares {count} properties, at most 15 fit the presence bitmap")]
    TooManyProperties { class: String, count: usize },

    #[error("unknown domain '{0}'")]
    UnknownDomain(String),

    #[error("unknown error class '{tag}' on constant '{constant}'")]
    UnknownErrorClass { constant: String, tag: String },

    #[error("unsupported default value {value} for field '{field}'")]
    UnsupportedDefault { field: String, value: String },
}
