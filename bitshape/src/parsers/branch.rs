use std::collections::BTreeMap;

use crate::{
	util::{hash_str, keyed_magics},
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Tagged union. Value is `(tag, variant value)`.
///
/// Writes the tag's position among the ordinally sorted tags with the adaptive
/// index codec, then the variant's own encoding.
#[derive(Clone, Debug)]
pub struct BranchParser<P> {
	variants: Vec<(String, P)>,
	magic: u32,
}

impl<P: Parser> BranchParser<P> {
	/// Build from `(tag, parser)` pairs. A repeated tag keeps the last parser.
	pub fn new<K, I>(variants: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, P)>,
	{
		let variants = variants
			.into_iter()
			.map(|(tag, parser)| (tag.into(), parser))
			.collect::<BTreeMap<_, _>>()
			.into_iter()
			.collect::<Vec<_>>();
		let magic = hash_str(&format!(
			"BranchParser:{}",
			keyed_magics(variants.iter().map(|(tag, parser)| (tag.as_str(), parser.magic())))
		));
		Self { variants, magic }
	}

	/// Tags in index order.
	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.variants.iter().map(|(tag, _)| tag.as_str())
	}

	fn position(&self, tag: &str) -> Result<usize> {
		self
			.variants
			.iter()
			.position(|(t, _)| t == tag)
			.ok_or_else(|| Error::UnknownTag(tag.to_string()))
	}
}

impl<P: Parser> Parser for BranchParser<P> {
	type Value = (String, P::Value);

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, (tag, value): &Self::Value) -> Result<()> {
		let index = self.position(tag)?;
		ctx.put_index(index, self.variants.len())?;
		ctx.encode(&self.variants[index].1, value)
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
		let index = ctx.get_index(self.variants.len())?;
		let (tag, parser) = &self.variants[index];
		Ok((tag.clone(), ctx.decode(parser)?))
	}
}

impl<P: DynamicParser> DynamicParser for BranchParser<P> {
	fn into_value(&self, (tag, value): Self::Value) -> Value {
		let value = match self.position(&tag) {
			Ok(index) => self.variants[index].1.into_value(value),
			Err(_) => Value::Null,
		};
		Value::Tagged(tag, Box::new(value))
	}

	fn from_value(&self, value: &Value) -> Result<Self::Value> {
		let Value::Tagged(tag, value) = value else {
			return Err(mismatch("tagged"));
		};
		let index = self.position(tag)?;
		Ok((tag.clone(), self.variants[index].1.from_value(value)?))
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let Value::Tagged(tag, value) = value else {
			return Err(mismatch("tagged"));
		};
		let index = self.position(tag)?;
		ctx.put_index(index, self.variants.len())?;
		ctx.encode_value(&self.variants[index].1, value)
	}
}
