use super::BinaryParser;
use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// UTF-8 text. Same layout as [`BinaryParser`] over the text's bytes.
#[derive(Clone, Debug)]
pub struct StringParser {
	magic: u32,
}

impl StringParser {
	pub fn new() -> Self {
		Self {
			magic: hash_str("StringParser"),
		}
	}
}

impl Default for StringParser {
	fn default() -> Self {
		Self::new()
	}
}

impl Parser for StringParser {
	type Value = String;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &String) -> Result<()> {
		BinaryParser::put(ctx, value.as_bytes());
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<String> {
		String::from_utf8(BinaryParser::get(ctx)?).map_err(|_| Error::InvalidUtf8)
	}
}

impl DynamicParser for StringParser {
	fn into_value(&self, value: String) -> Value {
		Value::Text(value)
	}

	fn from_value(&self, value: &Value) -> Result<String> {
		value.as_str().map(str::to_string).ok_or_else(|| mismatch("text"))
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let text = value.as_str().ok_or_else(|| mismatch("text"))?;
		BinaryParser::put(ctx, text.as_bytes());
		Ok(())
	}
}
