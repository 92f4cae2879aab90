use std::{fmt::Debug, marker::PhantomData};

use crate::{
	io::ByteIo,
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

mod sealed {
	pub trait Sealed {}
}

/// Fixed-width number kinds [`NumberParser`] can store.
///
/// Stored little-endian, taking exactly `size_of::<Self>()` bytes of body.
pub trait Number: Copy + PartialEq + Debug + Send + Sync + 'static + sealed::Sealed {
	/// Name of the kind, part of the parser's identity.
	const KIND: &'static str;

	fn write(self, io: &mut ByteIo);

	fn read(io: &mut ByteIo) -> Result<Self>;

	fn into_value(self) -> Value;

	fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_number {
	($ty:ty, $kind:literal, $variant:ident) => {
		impl sealed::Sealed for $ty {}

		impl Number for $ty {
			const KIND: &'static str = $kind;

			#[inline]
			fn write(self, io: &mut ByteIo) {
				io.put_bytes(&self.to_le_bytes());
			}

			#[inline]
			fn read(io: &mut ByteIo) -> Result<Self> {
				Ok(<$ty>::from_le_bytes(io.get_array()?))
			}

			#[inline]
			fn into_value(self) -> Value {
				Value::$variant(self)
			}

			#[inline]
			fn from_value(value: &Value) -> Option<Self> {
				match value {
					Value::$variant(number) => Some(*number),
					_ => None,
				}
			}
		}
	};
}

impl_number!(u8, "u8", U8);
impl_number!(u16, "u16", U16);
impl_number!(u32, "u32", U32);
impl_number!(u64, "u64", U64);
impl_number!(i8, "i8", I8);
impl_number!(i16, "i16", I16);
impl_number!(i32, "i32", I32);
impl_number!(i64, "i64", I64);
impl_number!(f32, "f32", F32);
impl_number!(f64, "f64", F64);

/// Fixed-width number of kind `N`.
pub struct NumberParser<N> {
	magic: u32,
	_marker: PhantomData<fn() -> N>,
}

impl<N: Number> NumberParser<N> {
	pub fn new() -> Self {
		Self {
			magic: hash_str(&format!("NumberParser:{}", N::KIND)),
			_marker: PhantomData,
		}
	}

	pub fn kind(&self) -> &'static str {
		N::KIND
	}
}

impl<N: Number> Default for NumberParser<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> Clone for NumberParser<N> {
	fn clone(&self) -> Self {
		Self {
			magic: self.magic,
			_marker: PhantomData,
		}
	}
}

impl<N: Number> Debug for NumberParser<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NumberParser")
			.field("kind", &N::KIND)
			.field("magic", &self.magic)
			.finish()
	}
}

impl<N: Number> Parser for NumberParser<N> {
	type Value = N;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	#[inline]
	fn encode_into(&self, ctx: &mut EncodeContext, value: &N) -> Result<()> {
		value.write(ctx.body());
		Ok(())
	}

	#[inline]
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<N> {
		N::read(ctx.body())
	}
}

impl<N: Number> DynamicParser for NumberParser<N> {
	fn into_value(&self, value: N) -> Value {
		value.into_value()
	}

	fn from_value(&self, value: &Value) -> Result<N> {
		N::from_value(value).ok_or_else(|| mismatch(N::KIND))
	}
}
