use crate::{
	util::hash_str,
	value::{DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Optional value: a presence bit, then the value's own encoding if present.
#[derive(Clone, Debug)]
pub struct NullableParser<P> {
	inner: P,
	magic: u32,
}

impl<P: Parser> NullableParser<P> {
	pub fn new(inner: P) -> Self {
		let magic = hash_str(&format!("NullableParser:{}", inner.magic()));
		Self { inner, magic }
	}

	pub fn inner(&self) -> &P {
		&self.inner
	}
}

impl<P: Parser> Parser for NullableParser<P> {
	type Value = Option<P::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &Option<P::Value>) -> Result<()> {
		match value {
			Some(value) => {
				ctx.put_bit(true);
				ctx.encode(&self.inner, value)
			}
			None => {
				ctx.put_bit(false);
				Ok(())
			}
		}
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Option<P::Value>> {
		if ctx.get_bit()? {
			Ok(Some(ctx.decode(&self.inner)?))
		} else {
			Ok(None)
		}
	}
}

impl<P: DynamicParser> DynamicParser for NullableParser<P> {
	fn into_value(&self, value: Option<P::Value>) -> Value {
		match value {
			Some(value) => self.inner.into_value(value),
			None => Value::Null,
		}
	}

	fn from_value(&self, value: &Value) -> Result<Option<P::Value>> {
		match value {
			Value::Null => Ok(None),
			value => Ok(Some(self.inner.from_value(value)?)),
		}
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		match value {
			Value::Null => {
				ctx.put_bit(false);
				Ok(())
			}
			value => {
				ctx.put_bit(true);
				ctx.encode_value(&self.inner, value)
			}
		}
	}
}
