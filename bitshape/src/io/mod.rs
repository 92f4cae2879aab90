//! Byte and bit streams the codecs read from and write to.

mod bits;
mod bytes;

pub use bits::BitIo;
pub use bytes::{ByteIo, Withheld, DEFAULT_CAPACITY, GROWTH_SLACK};
