use num_bigint::BigInt;

use crate::{
	util::{decode_bigint, encode_bigint, hash_str},
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Arbitrary-precision integer, stored as a variable-length integer.
///
/// Unsigned parsers reject negative values with
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
#[derive(Clone, Debug)]
pub struct BigIntParser {
	signed: bool,
	magic: u32,
}

impl BigIntParser {
	pub fn new(signed: bool) -> Self {
		let sign = if signed { "Signed" } else { "Unsigned" };
		Self {
			signed,
			magic: hash_str(&format!("BigIntParser:{sign}")),
		}
	}

	pub fn signed() -> Self {
		Self::new(true)
	}

	pub fn unsigned() -> Self {
		Self::new(false)
	}

	pub fn is_signed(&self) -> bool {
		self.signed
	}
}

impl Parser for BigIntParser {
	type Value = BigInt;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &BigInt) -> Result<()> {
		encode_bigint(ctx.body(), value, self.signed)
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<BigInt> {
		decode_bigint(ctx.body(), self.signed)
	}
}

impl DynamicParser for BigIntParser {
	fn into_value(&self, value: BigInt) -> Value {
		Value::BigInt(value)
	}

	/// Accepts any integer variant.
	fn from_value(&self, value: &Value) -> Result<BigInt> {
		Ok(match value {
			Value::BigInt(n) => n.clone(),
			Value::U8(n) => BigInt::from(*n),
			Value::U16(n) => BigInt::from(*n),
			Value::U32(n) => BigInt::from(*n),
			Value::U64(n) => BigInt::from(*n),
			Value::I8(n) => BigInt::from(*n),
			Value::I16(n) => BigInt::from(*n),
			Value::I32(n) => BigInt::from(*n),
			Value::I64(n) => BigInt::from(*n),
			_ => return Err(mismatch("integer")),
		})
	}
}
