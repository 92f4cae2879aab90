//! Dynamic values, for schemas whose children have different Rust types.
//!
//! Typed parsers encode their own `Value` type. To put parsers with different
//! value types side by side (fields of one object, variants of one branch),
//! erase them to [`AnyParser`] with [`DynamicParser::boxed`]. An `AnyParser`
//! encodes and decodes [`Value`].
//!
//! ```
//! use bitshape::{
//! 	AnyParser, BooleanParser, DynamicParser, EncodeOptions, NumberParser, ObjectParser, Parser,
//! 	StringParser, Value,
//! };
//!
//! let parser = ObjectParser::<AnyParser>::new([
//! 	("id", NumberParser::<u32>::new().boxed()),
//! 	("name", StringParser::new().boxed()),
//! 	("active", BooleanParser::new().boxed()),
//! ]);
//!
//! let value = Value::object([
//! 	("id", Value::from(7u32)),
//! 	("name", Value::from("ok")),
//! 	("active", Value::from(true)),
//! ]);
//! let map = value.as_object().unwrap().clone();
//!
//! let encoded = parser.encode(&map, &EncodeOptions::default()).unwrap();
//! assert_eq!(parser.decode(&encoded).unwrap(), map);
//! ```

use std::{collections::BTreeMap, time::SystemTime};

use num_bigint::BigInt;

use crate::{DecodeContext, EncodeContext, Error, Parser, Result};

/// A value of any shape the catalog can encode.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	F32(f32),
	F64(f64),
	BigInt(BigInt),
	Binary(Vec<u8>),
	Text(String),
	Date(SystemTime),
	Array(Vec<Value>),
	Tuple(Vec<Value>),
	/// Key-ordered map entries.
	Map(Vec<(Value, Value)>),
	Object(BTreeMap<String, Value>),
	/// Branch value: variant tag and the variant's value.
	Tagged(String, Box<Value>),
}

impl Value {
	/// Build an [`Value::Object`] from key/value pairs.
	pub fn object<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Value::Object(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Build a [`Value::Tagged`].
	pub fn tagged(tag: impl Into<String>, value: Value) -> Self {
		Value::Tagged(tag.into(), Box::new(value))
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Text(text) => Some(text),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}
}

macro_rules! impl_from {
	($ty:ty, $variant:ident) => {
		impl From<$ty> for Value {
			#[inline]
			fn from(value: $ty) -> Self {
				Value::$variant(value)
			}
		}
	};
}

impl_from!(bool, Bool);
impl_from!(u8, U8);
impl_from!(u16, U16);
impl_from!(u32, U32);
impl_from!(u64, U64);
impl_from!(i8, I8);
impl_from!(i16, I16);
impl_from!(i32, I32);
impl_from!(i64, I64);
impl_from!(f32, F32);
impl_from!(f64, F64);
impl_from!(BigInt, BigInt);
impl_from!(String, Text);
impl_from!(SystemTime, Date);
impl_from!(BTreeMap<String, Value>, Object);

impl From<&str> for Value {
	#[inline]
	fn from(value: &str) -> Self {
		Value::Text(value.to_string())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// Parser which can convert its values to and from [`Value`].
pub trait DynamicParser: Parser {
	fn into_value(&self, value: Self::Value) -> Value;

	fn from_value(&self, value: &Value) -> Result<Self::Value>;

	/// Encode straight from a [`Value`].
	///
	/// Default converts with [`from_value`](DynamicParser::from_value) first.
	/// Container parsers override this to walk the `Value` without cloning it.
	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let value = self.from_value(value)?;
		self.encode_into(ctx, &value)
	}

	/// Erase into an [`AnyParser`].
	fn boxed(self) -> AnyParser
	where Self: Sized + Send + Sync + 'static {
		Box::new(Erased(self))
	}
}

/// Type-erased parser of [`Value`]s.
pub type AnyParser = Box<dyn Parser<Value = Value> + Send + Sync>;

struct Erased<P>(P);

impl<P: DynamicParser> Parser for Erased<P> {
	type Value = Value;

	#[inline]
	fn magic(&self) -> u32 {
		self.0.magic()
	}

	#[inline]
	fn encode_into(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		self.0.encode_value(ctx, value)
	}

	#[inline]
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Value> {
		let value = self.0.decode_from(ctx)?;
		Ok(self.0.into_value(value))
	}
}

impl DynamicParser for AnyParser {
	#[inline]
	fn into_value(&self, value: Value) -> Value {
		value
	}

	#[inline]
	fn from_value(&self, value: &Value) -> Result<Value> {
		Ok(value.clone())
	}

	#[inline]
	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		self.encode_into(ctx, value)
	}

	/// Already erased.
	fn boxed(self) -> AnyParser {
		self
	}
}

/// Value type which can carry a branch-by-key discriminant.
pub trait TagField: Sized {
	fn as_tag(&self) -> Option<&str>;

	fn from_tag(tag: &str) -> Self;
}

impl TagField for Value {
	fn as_tag(&self) -> Option<&str> {
		self.as_str()
	}

	fn from_tag(tag: &str) -> Self {
		Value::Text(tag.to_string())
	}
}

impl TagField for String {
	fn as_tag(&self) -> Option<&str> {
		Some(self)
	}

	fn from_tag(tag: &str) -> Self {
		tag.to_string()
	}
}

#[inline]
pub(crate) fn mismatch(expected: &'static str) -> Error {
	Error::TypeMismatch { expected }
}
