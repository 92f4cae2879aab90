use std::borrow::Cow;

use super::StringParser;
use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Value type usable as a member of an [`EnumParser`].
///
/// Members are ordered, and identified, by their label.
pub trait EnumValue: Clone + PartialEq {
	fn label(&self) -> Cow<'_, str>;

	fn to_value(&self) -> Value;

	fn from_value(value: &Value) -> Option<Self>;
}

impl EnumValue for String {
	fn label(&self) -> Cow<'_, str> {
		Cow::Borrowed(self)
	}

	fn to_value(&self) -> Value {
		Value::Text(self.clone())
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

macro_rules! impl_enum_value_for_int {
	($($ty:ty => $variant:ident),+ $(,)?) => {
		$(
			impl EnumValue for $ty {
				fn label(&self) -> Cow<'_, str> {
					Cow::Owned(self.to_string())
				}

				fn to_value(&self) -> Value {
					Value::$variant(*self)
				}

				fn from_value(value: &Value) -> Option<Self> {
					match value {
						Value::$variant(n) => Some(*n),
						_ => None,
					}
				}
			}
		)+
	};
}

impl_enum_value_for_int!(
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
);

/// Sort members by label, dropping repeats, and render the identity fragment.
fn sorted_members<T: EnumValue>(values: impl IntoIterator<Item = T>) -> (Vec<T>, String) {
	let mut values = values.into_iter().collect::<Vec<_>>();
	values.sort_by(|a, b| a.label().cmp(&b.label()));
	values.dedup_by(|a, b| a.label() == b.label());
	let labels = values
		.iter()
		.map(|value| value.label().into_owned())
		.collect::<Vec<_>>()
		.join(",");
	(values, labels)
}

/// Closed set of values. Only the value's index among the sorted members is
/// written, with the adaptive index codec.
#[derive(Clone, Debug)]
pub struct EnumParser<T> {
	values: Vec<T>,
	magic: u32,
}

impl<T: EnumValue> EnumParser<T> {
	pub fn new(values: impl IntoIterator<Item = T>) -> Self {
		let (values, labels) = sorted_members(values);
		let magic = hash_str(&format!("EnumParser:{labels}"));
		Self { values, magic }
	}

	/// Members in index order.
	pub fn values(&self) -> &[T] {
		&self.values
	}

	fn position(&self, value: &T) -> Result<usize> {
		self
			.values
			.iter()
			.position(|v| v == value)
			.ok_or_else(|| Error::UnknownTag(value.label().into_owned()))
	}
}

impl<T: EnumValue> Parser for EnumParser<T> {
	type Value = T;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &T) -> Result<()> {
		let index = self.position(value)?;
		ctx.put_index(index, self.values.len())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<T> {
		let index = ctx.get_index(self.values.len())?;
		Ok(self.values[index].clone())
	}
}

impl<T: EnumValue> DynamicParser for EnumParser<T> {
	fn into_value(&self, value: T) -> Value {
		value.to_value()
	}

	fn from_value(&self, value: &Value) -> Result<T> {
		T::from_value(value).ok_or_else(|| mismatch("enum member"))
	}
}

/// Open set of strings with a list of common members.
///
/// One bit tells whether the value is a known member. Known members are
/// written as an index like [`EnumParser`], anything else as text.
#[derive(Clone, Debug)]
pub struct EnumFallbackParser {
	values: Vec<String>,
	text: StringParser,
	magic: u32,
}

impl EnumFallbackParser {
	pub fn new<S, I>(values: I) -> Self
	where
		S: Into<String>,
		I: IntoIterator<Item = S>,
	{
		let (values, labels) = sorted_members(values.into_iter().map(Into::<String>::into));
		let magic = hash_str(&format!("EnumFallbackParser:{labels}"));
		Self {
			values,
			text: StringParser::new(),
			magic,
		}
	}

	/// Known members in index order.
	pub fn values(&self) -> &[String] {
		&self.values
	}

	fn put(&self, ctx: &mut EncodeContext, value: &String) -> Result<()> {
		match self.values.iter().position(|v| v == value) {
			Some(index) => {
				ctx.put_bit(true);
				ctx.put_index(index, self.values.len())
			}
			None => {
				ctx.put_bit(false);
				ctx.encode(&self.text, value)
			}
		}
	}
}

impl Parser for EnumFallbackParser {
	type Value = String;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &String) -> Result<()> {
		self.put(ctx, value)
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<String> {
		if ctx.get_bit()? {
			let index = ctx.get_index(self.values.len())?;
			Ok(self.values[index].clone())
		} else {
			ctx.decode(&self.text)
		}
	}
}

impl DynamicParser for EnumFallbackParser {
	fn into_value(&self, value: String) -> Value {
		Value::Text(value)
	}

	fn from_value(&self, value: &Value) -> Result<String> {
		value.as_str().map(str::to_string).ok_or_else(|| mismatch("text"))
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		match value {
			Value::Text(text) => self.put(ctx, text),
			_ => Err(mismatch("text")),
		}
	}
}
