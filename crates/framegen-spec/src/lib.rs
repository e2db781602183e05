//! Read-only object model of a binary wire protocol description.
//!
//! Classes own their methods and property lists, methods own their argument
//! lists, and every field carries the 0-based position it was declared at.
//! Domain aliases resolve to one of the primitive [`WireType`]s.

pub mod error;
pub mod load;
pub mod node;
pub mod types;

/// Maximum number of properties a class may declare.
/// The presence bitmap is 16 bits wide and the low bit is never assigned.
pub const MAX_PROPERTIES: usize = 15;

/// Maximum number of boolean fields packed into one wire byte.
pub const MAX_BIT_GROUP: usize = 8;

pub use error::SpecError;

