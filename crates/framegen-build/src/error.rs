use framegen_spec::{
    SpecError,
    types::{DefaultValue, WireType},
};
use thiserror::Error as ThisError;

///
/// GenerateError
///
/// Every variant aborts the run; no partial artifact is ever written.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum GenerateError {
    #[error("invalid generator config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("exception constant '{name}' has code {code}, reply codes are 16-bit")]
    ConstantOutOfRange { name: String, code: u32 },

    #[error("default {default} of field '{field}' in {owner} does not fit wire type {ty}")]
    DefaultMismatch {
        owner: String,
        field: String,
        default: DefaultValue,
        ty: WireType,
    },

    #[error("'{0}' cannot be turned into a Rust identifier")]
    InvalidName(String),

    #[error("cannot write artifacts: {0}")]
    Io(#[from] std::io::Error),

    #[error("no hard-error constant named 'internal-error' to classify unknown exception codes")]
    MissingFallback,

    #[error("invalid runtime crate path '{0}'")]
    RuntimePath(String),

    #[error(transparent)]
    Spec(#[from] SpecError),
}
