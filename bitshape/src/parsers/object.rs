use std::collections::BTreeMap;

use crate::{
	util::{hash_str, keyed_magics},
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Keyed record. Fields are encoded one after another in ordinal key order,
/// with no keys or separators on the wire.
///
/// Keys are sorted at construction, so declaration order affects neither the
/// encoding nor the identity tag. Keys in an encoded value which the schema
/// does not declare are ignored.
#[derive(Clone, Debug)]
pub struct ObjectParser<P> {
	fields: Vec<(String, P)>,
	magic: u32,
}

/// Identity tag of a keyed record. `fields` must be in ordinal key order.
pub(crate) fn object_magic<'a, I>(fields: I) -> u32
where I: IntoIterator<Item = (&'a str, u32)> {
	hash_str(&format!("ObjectParser:{}", keyed_magics(fields)))
}

impl<P: Parser> ObjectParser<P> {
	/// Build from `(key, parser)` pairs. A repeated key keeps the last parser.
	pub fn new<K, I>(fields: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, P)>,
	{
		let fields = fields
			.into_iter()
			.map(|(key, parser)| (key.into(), parser))
			.collect::<BTreeMap<_, _>>()
			.into_iter()
			.collect::<Vec<_>>();
		let magic = object_magic(fields.iter().map(|(key, parser)| (key.as_str(), parser.magic())));
		Self { fields, magic }
	}

	/// Keys in encoding order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(key, _)| key.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.fields.iter().any(|(k, _)| k == key)
	}

	pub fn get(&self, key: &str) -> Option<&P> {
		self
			.fields
			.iter()
			.find_map(|(k, parser)| (k == key).then_some(parser))
	}
}

impl<P: Parser> Parser for ObjectParser<P> {
	type Value = BTreeMap<String, P::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, object: &Self::Value) -> Result<()> {
		for (key, parser) in &self.fields {
			let value = object.get(key).ok_or_else(|| Error::MissingField(key.clone()))?;
			ctx.encode(parser, value)?;
		}
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
		let mut object = BTreeMap::new();
		for (key, parser) in &self.fields {
			object.insert(key.clone(), ctx.decode(parser)?);
		}
		Ok(object)
	}
}

impl<P: DynamicParser> DynamicParser for ObjectParser<P> {
	fn into_value(&self, object: Self::Value) -> Value {
		Value::Object(
			object
				.into_iter()
				.map(|(key, value)| {
					let value = match self.get(&key) {
						Some(parser) => parser.into_value(value),
						None => Value::Null,
					};
					(key, value)
				})
				.collect(),
		)
	}

	fn from_value(&self, value: &Value) -> Result<Self::Value> {
		let object = value.as_object().ok_or_else(|| mismatch("object"))?;
		self
			.fields
			.iter()
			.map(|(key, parser)| {
				let value = object.get(key).ok_or_else(|| Error::MissingField(key.clone()))?;
				Ok((key.clone(), parser.from_value(value)?))
			})
			.collect()
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let object = value.as_object().ok_or_else(|| mismatch("object"))?;
		for (key, parser) in &self.fields {
			let value = object.get(key).ok_or_else(|| Error::MissingField(key.clone()))?;
			ctx.encode_value(parser, value)?;
		}
		Ok(())
	}
}
