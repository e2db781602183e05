//! Support library for generated framing code.
//!
//! Generated decoders read through a [`Reader`] and generated encoders write
//! through a [`Writer`]; both enforce the byte-exact layout of each wire type.
//! Nested field tables are handled by [`FieldTable`].

pub mod error;
pub mod exception;
pub mod reader;
pub mod table;
pub mod writer;

pub use error::FrameError;
pub use exception::{ExceptionInfo, unknown_exception};
pub use reader::Reader;
pub use table::{FieldTable, FieldValue, TableError};
pub use writer::Writer;

/// Check that a decoded short string is well-formed UTF-8.
pub fn assert_utf8(name: &'static str, bytes: &[u8]) -> Result<(), FrameError> {
    std::str::from_utf8(bytes)
        .map(|_| ())
        .map_err(|_| FrameError::InvalidUtf8 { name })
}

///
/// TESTS
///
