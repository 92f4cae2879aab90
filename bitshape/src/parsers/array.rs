use super::MAX_PREALLOC;
use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Homogeneous list: varint count, then each item in order.
#[derive(Clone, Debug)]
pub struct ArrayParser<P> {
	item: P,
	magic: u32,
}

impl<P: Parser> ArrayParser<P> {
	pub fn new(item: P) -> Self {
		let magic = hash_str(&format!("ArrayParser:{}", item.magic()));
		Self { item, magic }
	}

	pub fn item(&self) -> &P {
		&self.item
	}
}

impl<P: Parser> Parser for ArrayParser<P> {
	type Value = Vec<P::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &Vec<P::Value>) -> Result<()> {
		ctx.put_length(value.len());
		for item in value {
			ctx.encode(&self.item, item)?;
		}
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Vec<P::Value>> {
		let len = ctx.get_length()?;
		let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
		for _ in 0..len {
			items.push(ctx.decode(&self.item)?);
		}
		Ok(items)
	}
}

impl<P: DynamicParser> DynamicParser for ArrayParser<P> {
	fn into_value(&self, value: Vec<P::Value>) -> Value {
		Value::Array(value.into_iter().map(|item| self.item.into_value(item)).collect())
	}

	fn from_value(&self, value: &Value) -> Result<Vec<P::Value>> {
		match value {
			Value::Array(items) => items.iter().map(|item| self.item.from_value(item)).collect(),
			_ => Err(mismatch("array")),
		}
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let Value::Array(items) = value else {
			return Err(mismatch("array"));
		};
		ctx.put_length(items.len());
		for item in items {
			ctx.encode_value(&self.item, item)?;
		}
		Ok(())
	}
}
