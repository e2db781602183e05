use crate::table::TableError;
use thiserror::Error as ThisError;

///
/// FrameError
///
/// Errors raised by generated codecs at their own runtime. Framing and
/// overflow errors are returned to the caller as-is; unknown identifiers
/// mean the peer violated the protocol.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum FrameError {
    #[error("frame error in {name}: {} bytes do not match its layout", .payload.len())]
    Framing { name: &'static str, payload: Vec<u8> },

    #[error("invalid utf-8 in a short string of {name}")]
    InvalidUtf8 { name: &'static str },

    #[error("long string of {len} bytes exceeds its 32-bit length prefix")]
    LongStrOverflow { len: usize },

    #[error("reserved property flags {flags:#06x} set for class {class_id}")]
    ReservedFlags { class_id: u16, flags: u16 },

    #[error("short string of {len} bytes exceeds 255")]
    ShortStrOverflow { len: usize },

    #[error("malformed field table in {name}: {source}")]
    Table {
        name: &'static str,
        source: TableError,
    },

    #[error("unknown class id {0}")]
    UnknownClassId(u16),

    #[error("unknown class name '{0}'")]
    UnknownClassName(String),

    #[error("unknown method id {class_id}/{method_id}")]
    UnknownMethodId { class_id: u16, method_id: u16 },
}
