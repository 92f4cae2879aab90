use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Raw bytes, stored as a varint length followed by the bytes.
#[derive(Clone, Debug)]
pub struct BinaryParser {
	magic: u32,
}

impl BinaryParser {
	pub fn new() -> Self {
		Self {
			magic: hash_str("BinaryParser"),
		}
	}

	pub(crate) fn put(ctx: &mut EncodeContext, bytes: &[u8]) {
		ctx.put_length(bytes.len());
		ctx.body().put_bytes(bytes);
	}

	pub(crate) fn get(ctx: &mut DecodeContext) -> Result<Vec<u8>> {
		let len = ctx.get_length()?;
		Ok(ctx.body().get_bytes(len)?.to_vec())
	}
}

impl Default for BinaryParser {
	fn default() -> Self {
		Self::new()
	}
}

impl Parser for BinaryParser {
	type Value = Vec<u8>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &Vec<u8>) -> Result<()> {
		Self::put(ctx, value);
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Vec<u8>> {
		Self::get(ctx)
	}
}

impl DynamicParser for BinaryParser {
	fn into_value(&self, value: Vec<u8>) -> Value {
		Value::Binary(value)
	}

	fn from_value(&self, value: &Value) -> Result<Vec<u8>> {
		match value {
			Value::Binary(bytes) => Ok(bytes.clone()),
			_ => Err(mismatch("binary")),
		}
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		match value {
			Value::Binary(bytes) => {
				Self::put(ctx, bytes);
				Ok(())
			}
			_ => Err(mismatch("binary")),
		}
	}
}
