use std::collections::BTreeMap;

use super::ObjectParser;
use crate::{
	util::{hash_str, keyed_magics},
	value::{mismatch, DynamicParser, TagField, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Union of objects, discriminated by one of the object's own fields.
///
/// The discriminant field holds the variant's tag. It is not encoded as a
/// field: the tag's index is written with the adaptive index codec, followed
/// by the variant object, and the field is put back on decode.
#[derive(Clone, Debug)]
pub struct BranchByKeyParser<P> {
	key: String,
	variants: Vec<(String, ObjectParser<P>)>,
	magic: u32,
}

impl<P: Parser> BranchByKeyParser<P> {
	/// Build from a discriminant key and `(tag, object parser)` pairs.
	///
	/// Fails with [`Error::EncodingConflict`] if any variant declares `key` as
	/// one of its fields.
	pub fn new<S, K, I>(key: S, variants: I) -> Result<Self>
	where
		S: Into<String>,
		K: Into<String>,
		I: IntoIterator<Item = (K, ObjectParser<P>)>,
	{
		let key = key.into();
		let variants = variants
			.into_iter()
			.map(|(tag, object)| (tag.into(), object))
			.collect::<BTreeMap<_, _>>()
			.into_iter()
			.collect::<Vec<_>>();

		if let Some((tag, _)) = variants.iter().find(|(_, object)| object.contains_key(&key)) {
			return Err(Error::EncodingConflict {
				variant: tag.clone(),
				key,
			});
		}

		let magic = hash_str(&format!(
			"BranchByKeyParser:{key}:{}",
			keyed_magics(variants.iter().map(|(tag, object)| (tag.as_str(), object.magic())))
		));
		Ok(Self {
			key,
			variants,
			magic,
		})
	}

	/// Name of the discriminant field.
	pub fn key(&self) -> &str {
		&self.key
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

	fn tag_index<T: TagField>(&self, tag: Option<&T>) -> Result<usize> {
		let tag = tag
			.and_then(|tag| tag.as_tag())
			.ok_or_else(|| Error::MissingField(self.key.clone()))?;
		self.position(tag)
	}
}

impl<P> Parser for BranchByKeyParser<P>
where
	P: Parser,
	P::Value: TagField,
{
	type Value = BTreeMap<String, P::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, object: &Self::Value) -> Result<()> {
		let index = self.tag_index(object.get(&self.key))?;
		ctx.put_index(index, self.variants.len())?;
		ctx.encode(&self.variants[index].1, object)
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
		let index = ctx.get_index(self.variants.len())?;
		let (tag, variant) = &self.variants[index];
		let mut object = ctx.decode(variant)?;
		object.insert(self.key.clone(), P::Value::from_tag(tag));
		Ok(object)
	}
}

impl<P> DynamicParser for BranchByKeyParser<P>
where
	P: DynamicParser,
	P::Value: TagField,
{
	fn into_value(&self, object: Self::Value) -> Value {
		let variant = object
			.get(&self.key)
			.and_then(|tag| tag.as_tag())
			.and_then(|tag| self.position(tag).ok());
		let mut out = match variant {
			Some(index) => match self.variants[index].1.into_value(object) {
				Value::Object(out) => out,
				_ => BTreeMap::new(),
			},
			None => BTreeMap::new(),
		};
		if let Some(index) = variant {
			out.insert(self.key.clone(), Value::from_tag(&self.variants[index].0));
		}
		Value::Object(out)
	}

	fn from_value(&self, value: &Value) -> Result<Self::Value> {
		let object = value.as_object().ok_or_else(|| mismatch("object"))?;
		let index = self.tag_index(object.get(&self.key))?;
		let (tag, variant) = &self.variants[index];
		let mut out = variant.from_value(value)?;
		out.insert(self.key.clone(), P::Value::from_tag(tag));
		Ok(out)
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let object = value.as_object().ok_or_else(|| mismatch("object"))?;
		let index = self.tag_index(object.get(&self.key))?;
		ctx.put_index(index, self.variants.len())?;
		ctx.encode_value(&self.variants[index].1, value)
	}
}
