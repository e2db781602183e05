use crate::{error::FrameError, table::FieldTable};

///
/// Writer
///
/// Append-only buffer for one method or property payload. Variable-width
/// values are written as length prefix followed by payload.
///

#[derive(Clone, Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn octet(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn short(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn long(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn longlong(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn timestamp(&mut self, value: u64) {
        self.longlong(value);
    }

    pub fn shortstr(&mut self, value: &[u8]) -> Result<(), FrameError> {
        let len = u8::try_from(value.len()).map_err(|_| FrameError::ShortStrOverflow {
            len: value.len(),
        })?;

        self.buf.push(len);
        self.buf.extend_from_slice(value);

        Ok(())
    }

    pub fn longstr(&mut self, value: &[u8]) -> Result<(), FrameError> {
        self.long_prefixed(value)
    }

    pub fn table(&mut self, value: &FieldTable) -> Result<(), FrameError> {
        let bytes = value.encode().map_err(|source| FrameError::Table {
            name: "table",
            source,
        })?;

        self.long_prefixed(&bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Finish a property payload: the 16-bit presence bitmap followed by the
    /// values written so far.
    #[must_use]
    pub fn into_flagged(self, flags: u16) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.buf.len());
        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(&self.buf);

        out
    }

    fn long_prefixed(&mut self, value: &[u8]) -> Result<(), FrameError> {
        let len = u32::try_from(value.len()).map_err(|_| FrameError::LongStrOverflow {
            len: value.len(),
        })?;

        self.long(len);
        self.buf.extend_from_slice(value);

        Ok(())
    }
}

///
/// TESTS
///
