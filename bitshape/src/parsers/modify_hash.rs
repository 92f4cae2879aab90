use crate::{
	util::hash_str,
	value::{DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Encodes exactly like `P`, under a different identity tag.
///
/// Changing `modifier` makes old payloads fail to decode with
/// [`Error::SchemaMismatch`](crate::Error::SchemaMismatch), without changing
/// the wire layout.
#[derive(Clone, Debug)]
pub struct ModifyHashParser<P> {
	modifier: String,
	inner: P,
	magic: u32,
}

impl<P: Parser> ModifyHashParser<P> {
	pub fn new(modifier: impl Into<String>, inner: P) -> Self {
		let modifier = modifier.into();
		let magic = hash_str(&format!("ModifyHashParser:{}:{modifier}", inner.magic()));
		Self {
			modifier,
			inner,
			magic,
		}
	}

	pub fn modifier(&self) -> &str {
		&self.modifier
	}

	pub fn inner(&self) -> &P {
		&self.inner
	}
}

impl<P: Parser> Parser for ModifyHashParser<P> {
	type Value = P::Value;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	#[inline]
	fn encode_into(&self, ctx: &mut EncodeContext, value: &P::Value) -> Result<()> {
		ctx.encode(&self.inner, value)
	}

	#[inline]
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<P::Value> {
		ctx.decode(&self.inner)
	}
}

impl<P: DynamicParser> DynamicParser for ModifyHashParser<P> {
	#[inline]
	fn into_value(&self, value: P::Value) -> Value {
		self.inner.into_value(value)
	}

	#[inline]
	fn from_value(&self, value: &Value) -> Result<P::Value> {
		self.inner.from_value(value)
	}

	#[inline]
	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		ctx.encode_value(&self.inner, value)
	}
}
