use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Boolean, stored as a single bit of the bit field.
#[derive(Clone, Debug)]
pub struct BooleanParser {
	magic: u32,
}

impl BooleanParser {
	pub fn new() -> Self {
		Self {
			magic: hash_str("BooleanParser"),
		}
	}
}

impl Default for BooleanParser {
	fn default() -> Self {
		Self::new()
	}
}

impl Parser for BooleanParser {
	type Value = bool;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	#[inline]
	fn encode_into(&self, ctx: &mut EncodeContext, value: &bool) -> Result<()> {
		ctx.put_bit(*value);
		Ok(())
	}

	#[inline]
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<bool> {
		ctx.get_bit()
	}
}

impl DynamicParser for BooleanParser {
	fn into_value(&self, value: bool) -> Value {
		Value::Bool(value)
	}

	fn from_value(&self, value: &Value) -> Result<bool> {
		match value {
			Value::Bool(b) => Ok(*b),
			_ => Err(mismatch("bool")),
		}
	}
}
