//! The schema type catalog.

mod array;
pub use array::ArrayParser;
mod bigint;
pub use bigint::BigIntParser;
mod binary;
pub use binary::BinaryParser;
mod boolean;
pub use boolean::BooleanParser;
mod branch;
pub use branch::BranchParser;
mod branch_by_key;
pub use branch_by_key::BranchByKeyParser;
mod date;
pub use date::DateParser;
mod enums;
pub use enums::{EnumFallbackParser, EnumParser, EnumValue};
mod map;
pub use map::MapParser;
mod modify_hash;
pub use modify_hash::ModifyHashParser;
mod nullable;
pub use nullable::NullableParser;
mod number;
pub use number::{Number, NumberParser};
mod object;
pub(crate) use object::object_magic;
pub use object::ObjectParser;
mod string;
pub use string::StringParser;
mod tuple;
pub use tuple::{TupleElements, TupleParser};

/// Upper bound on items preallocated from a decoded count.
///
/// Items that occupy input bytes or bits make a corrupt count fail with
/// [`Error::UnexpectedEnd`](crate::Error::UnexpectedEnd) once the input runs
/// out. Items with no wire representation at all (a one-member enum, an object
/// with no fields) consume nothing, so for those the count alone decides how
/// many are produced.
pub(crate) const MAX_PREALLOC: usize = 4096;
