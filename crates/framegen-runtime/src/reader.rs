use crate::{error::FrameError, table::FieldTable};

///
/// Reader
///
/// Cursor over one method or property payload. Any read past the end, and
/// any byte left over at [`Reader::finish`], is a framing error naming the
/// payload's owner and carrying the raw bytes.
///

#[derive(Debug)]
pub struct Reader<'a> {
    name: &'static str,
    payload: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub const fn new(name: &'static str, payload: &'a [u8]) -> Self {
        Self {
            name,
            payload,
            pos: 0,
        }
    }

    pub fn octet(&mut self) -> Result<u8, FrameError> {
        let [byte] = self.array::<1>()?;

        Ok(byte)
    }

    pub fn short(&mut self) -> Result<u16, FrameError> {
        self.array().map(u16::from_be_bytes)
    }

    pub fn long(&mut self) -> Result<u32, FrameError> {
        self.array().map(u32::from_be_bytes)
    }

    pub fn longlong(&mut self) -> Result<u64, FrameError> {
        self.array().map(u64::from_be_bytes)
    }

    pub fn timestamp(&mut self) -> Result<u64, FrameError> {
        self.longlong()
    }

    pub fn shortstr(&mut self) -> Result<Vec<u8>, FrameError> {
        let len = usize::from(self.octet()?);

        self.take(len).map(<[u8]>::to_vec)
    }

    pub fn longstr(&mut self) -> Result<Vec<u8>, FrameError> {
        self.long_prefixed().map(<[u8]>::to_vec)
    }

    pub fn table(&mut self) -> Result<FieldTable, FrameError> {
        let name = self.name;
        let bytes = self.long_prefixed()?;

        FieldTable::decode(bytes).map_err(|source| FrameError::Table { name, source })
    }

    /// Succeed only if every byte of the payload has been consumed.
    pub fn finish(self) -> Result<(), FrameError> {
        if self.pos == self.payload.len() {
            Ok(())
        } else {
            Err(self.framing_error())
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.pos
    }

    #[must_use]
    pub fn framing_error(&self) -> FrameError {
        FrameError::Framing {
            name: self.name,
            payload: self.payload.to_vec(),
        }
    }

    fn long_prefixed(&mut self) -> Result<&'a [u8], FrameError> {
        let len = usize::try_from(self.long()?).map_err(|_| self.framing_error())?;

        self.take(len)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FrameError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);

        Ok(out)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FrameError> {
        if len > self.remaining() {
            return Err(self.framing_error());
        }

        let bytes = &self.payload[self.pos..self.pos + len];
        self.pos += len;

        Ok(bytes)
    }
}

///
/// TESTS
///
