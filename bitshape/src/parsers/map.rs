use std::collections::BTreeMap;

use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Key-ordered map: varint count, then key and value of each entry.
///
/// Entries are written in key order. On decode a repeated key keeps the last
/// value read.
#[derive(Clone, Debug)]
pub struct MapParser<K, V> {
	key: K,
	value: V,
	magic: u32,
}

impl<K: Parser, V: Parser> MapParser<K, V> {
	pub fn new(key: K, value: V) -> Self {
		let magic = hash_str(&format!("MapParser:{}-{}", key.magic(), value.magic()));
		Self { key, value, magic }
	}
}

impl<K, V> Parser for MapParser<K, V>
where
	K: Parser,
	K::Value: Ord,
	V: Parser,
{
	type Value = BTreeMap<K::Value, V::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, map: &Self::Value) -> Result<()> {
		ctx.put_length(map.len());
		for (key, value) in map {
			ctx.encode(&self.key, key)?;
			ctx.encode(&self.value, value)?;
		}
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
		let len = ctx.get_length()?;
		let mut map = BTreeMap::new();
		for _ in 0..len {
			let key = ctx.decode(&self.key)?;
			let value = ctx.decode(&self.value)?;
			map.insert(key, value);
		}
		Ok(map)
	}
}

impl<K, V> DynamicParser for MapParser<K, V>
where
	K: DynamicParser,
	K::Value: Ord,
	V: DynamicParser,
{
	fn into_value(&self, map: Self::Value) -> Value {
		Value::Map(
			map
				.into_iter()
				.map(|(key, value)| (self.key.into_value(key), self.value.into_value(value)))
				.collect(),
		)
	}

	fn from_value(&self, value: &Value) -> Result<Self::Value> {
		let Value::Map(entries) = value else {
			return Err(mismatch("map"));
		};
		entries
			.iter()
			.map(|(key, value)| Ok((self.key.from_value(key)?, self.value.from_value(value)?)))
			.collect()
	}
}
