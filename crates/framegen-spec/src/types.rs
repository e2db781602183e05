use crate::error::SpecError;
use derive_more::Display;
use std::str::FromStr;

///
/// WireType
///
/// The primitive encodings every domain alias ultimately resolves to.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum WireType {
    #[display("bit")]
    Bit,
    #[display("long")]
    Long,
    #[display("longlong")]
    LongLong,
    #[display("longstr")]
    LongStr,
    #[display("octet")]
    Octet,
    #[display("short")]
    Short,
    #[display("shortstr")]
    ShortStr,
    #[display("table")]
    Table,
    #[display("timestamp")]
    Timestamp,
}

impl WireType {
    pub const ALL: [Self; 9] = [
        Self::Bit,
        Self::Long,
        Self::LongLong,
        Self::LongStr,
        Self::Octet,
        Self::Short,
        Self::ShortStr,
        Self::Table,
        Self::Timestamp,
    ];

    /// Width in bytes of a fixed-width big-endian integer encoding.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Octet => Some(1),
            Self::Short => Some(2),
            Self::Long => Some(4),
            Self::LongLong | Self::Timestamp => Some(8),
            Self::Bit | Self::LongStr | Self::ShortStr | Self::Table => None,
        }
    }

    /// Width in bytes of the length prefix of a variable-width encoding.
    #[must_use]
    pub const fn length_prefix(self) -> Option<usize> {
        match self {
            Self::ShortStr => Some(1),
            Self::LongStr | Self::Table => Some(4),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_bit(self) -> bool {
        matches!(self, Self::Bit)
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.fixed_width().is_some()
    }
}

impl FromStr for WireType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "bit" => Self::Bit,
            "long" => Self::Long,
            "longlong" => Self::LongLong,
            "longstr" => Self::LongStr,
            "octet" => Self::Octet,
            "short" => Self::Short,
            "shortstr" => Self::ShortStr,
            "table" => Self::Table,
            "timestamp" => Self::Timestamp,
            _ => return Err(SpecError::UnknownDomain(s.to_string())),
        };

        Ok(ty)
    }
}

///
/// ErrorClass
///
/// Classification carried by a constant. Soft errors close a channel,
/// hard errors close the connection.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    #[default]
    #[display("none")]
    None,
    #[display("soft-error")]
    Soft,
    #[display("hard-error")]
    Hard,
}

impl ErrorClass {
    /// Parse a classification tag.
    ///
    /// Older descriptions spell the tags with a space (`soft error`), newer
    /// ones with a hyphen, so both normalize to the same class.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.to_ascii_uppercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "" => Some(Self::None),
            "SOFT_ERROR" => Some(Self::Soft),
            "HARD_ERROR" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_exception(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Hard)
    }
}

///
/// DefaultValue
///
/// Default a field record starts out with. Tables only support the empty
/// table as a default.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum DefaultValue {
    #[display("{_0}")]
    Bool(bool),
    #[display("{_0}")]
    Int(u64),
    #[display("{_0:?}")]
    Text(String),
    #[display("{{}}")]
    EmptyTable,
}

///
/// TESTS
///
