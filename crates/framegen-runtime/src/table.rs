//! Field-table codec.
//!
//! A table is a sequence of `shortstr name, tag byte, value` entries; an
//! array is a sequence of `tag byte, value` entries. Both are carried inside a
//! 32-bit length prefix by their container. All integers are big-endian.

use derive_more::{Deref, From, IntoIterator};
use thiserror::Error as ThisError;

///
/// TableError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum TableError {
    #[error("field name of {len} bytes exceeds 255")]
    NameTooLong { len: usize },

    #[error("field value of {len} bytes exceeds its 32-bit length prefix")]
    TooLarge { len: usize },

    #[error("field table truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("unknown field value tag {tag:#04x} at byte {offset}")]
    UnknownTag { tag: u8, offset: usize },
}

///
/// FieldValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    LongStr(Vec<u8>),
    SignedInt(i32),
    Decimal { scale: u8, value: u32 },
    Timestamp(u64),
    Table(FieldTable),
    Byte(i8),
    Double(f64),
    Float(f32),
    Long(i64),
    Short(i16),
    Bool(bool),
    Binary(Vec<u8>),
    Void,
    Array(Vec<FieldValue>),
    UnsignedByte(u8),
    UnsignedShort(u16),
    UnsignedInt(u32),
}

impl FieldValue {
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::LongStr(_) => b'S',
            Self::SignedInt(_) => b'I',
            Self::Decimal { .. } => b'D',
            Self::Timestamp(_) => b'T',
            Self::Table(_) => b'F',
            Self::Byte(_) => b'b',
            Self::Double(_) => b'd',
            Self::Float(_) => b'f',
            Self::Long(_) => b'l',
            Self::Short(_) => b's',
            Self::Bool(_) => b't',
            Self::Binary(_) => b'x',
            Self::Void => b'V',
            Self::Array(_) => b'A',
            Self::UnsignedByte(_) => b'B',
            Self::UnsignedShort(_) => b'u',
            Self::UnsignedInt(_) => b'i',
        }
    }

    fn decode(c: &mut Cursor<'_>) -> Result<Self, TableError> {
        let offset = c.pos;
        let tag = c.u8()?;

        let value = match tag {
            b'S' => Self::LongStr(c.long_prefixed()?.to_vec()),
            b'I' => Self::SignedInt(i32::from_be_bytes(c.array()?)),
            b'D' => {
                let scale = c.u8()?;
                let value = u32::from_be_bytes(c.array()?);
                Self::Decimal { scale, value }
            }
            b'T' => Self::Timestamp(u64::from_be_bytes(c.array()?)),
            b'F' => Self::Table(FieldTable::decode(c.long_prefixed()?)?),
            b'b' => Self::Byte(i8::from_be_bytes(c.array()?)),
            b'd' => Self::Double(f64::from_be_bytes(c.array()?)),
            b'f' => Self::Float(f32::from_be_bytes(c.array()?)),
            b'l' => Self::Long(i64::from_be_bytes(c.array()?)),
            b's' => Self::Short(i16::from_be_bytes(c.array()?)),
            b't' => Self::Bool(c.u8()? != 0),
            b'x' => Self::Binary(c.long_prefixed()?.to_vec()),
            b'V' => Self::Void,
            b'A' => {
                let mut inner = Cursor::new(c.long_prefixed()?);
                let mut values = Vec::new();
                while !inner.is_empty() {
                    values.push(Self::decode(&mut inner)?);
                }
                Self::Array(values)
            }
            b'B' => Self::UnsignedByte(c.u8()?),
            b'u' => Self::UnsignedShort(u16::from_be_bytes(c.array()?)),
            b'i' => Self::UnsignedInt(u32::from_be_bytes(c.array()?)),
            _ => return Err(TableError::UnknownTag { tag, offset }),
        };

        Ok(value)
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), TableError> {
        out.push(self.tag());

        match self {
            Self::LongStr(bytes) | Self::Binary(bytes) => write_long_prefixed(out, bytes)?,
            Self::SignedInt(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Decimal { scale, value } => {
                out.push(*scale);
                out.extend_from_slice(&value.to_be_bytes());
            }
            Self::Timestamp(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Table(table) => write_long_prefixed(out, &table.encode()?)?,
            Self::Byte(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Double(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Bool(v) => out.push(u8::from(*v)),
            Self::Void => {}
            Self::Array(values) => {
                let mut inner = Vec::new();
                for value in values {
                    value.encode_into(&mut inner)?;
                }
                write_long_prefixed(out, &inner)?;
            }
            Self::UnsignedByte(v) => out.push(*v),
            Self::UnsignedShort(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::UnsignedInt(v) => out.extend_from_slice(&v.to_be_bytes()),
        }

        Ok(())
    }
}

///
/// FieldTable
///
/// Ordered name/value entries. Order is kept as decoded so re-encoding a
/// decoded table reproduces its bytes.
///

#[derive(Clone, Debug, Default, Deref, From, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct FieldTable(Vec<(Vec<u8>, FieldValue)>);

impl FieldTable {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: impl Into<Vec<u8>>, value: FieldValue) {
        self.0.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &[u8]) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Parse the body of a table (without its outer length prefix).
    pub fn decode(bytes: &[u8]) -> Result<Self, TableError> {
        let mut c = Cursor::new(bytes);
        let mut entries = Vec::new();

        while !c.is_empty() {
            let len = usize::from(c.u8()?);
            let name = c.take(len)?.to_vec();
            let value = FieldValue::decode(&mut c)?;
            entries.push((name, value));
        }

        Ok(Self(entries))
    }

    /// Serialize the body of a table (without its outer length prefix).
    pub fn encode(&self) -> Result<Vec<u8>, TableError> {
        let mut out = Vec::new();

        for (name, value) in &self.0 {
            let len =
                u8::try_from(name.len()).map_err(|_| TableError::NameTooLong { len: name.len() })?;
            out.push(len);
            out.extend_from_slice(name);
            value.encode_into(&mut out)?;
        }

        Ok(out)
    }
}

fn write_long_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), TableError> {
    let len = u32::try_from(bytes.len()).map_err(|_| TableError::TooLarge { len: bytes.len() })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);

    Ok(())
}

///
/// Cursor
///

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    const fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], TableError> {
        if len > self.bytes.len() - self.pos {
            return Err(TableError::Truncated { offset: self.pos });
        }

        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;

        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], TableError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);

        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, TableError> {
        let [byte] = self.array::<1>()?;

        Ok(byte)
    }

    fn long_prefixed(&mut self) -> Result<&'a [u8], TableError> {
        let len = u32::from_be_bytes(self.array()?);
        let len = usize::try_from(len).map_err(|_| TableError::Truncated { offset: self.pos })?;

        self.take(len)
    }
}

///
/// TESTS
///
