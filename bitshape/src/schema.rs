//! Parsers derived from Rust types.
//!
//! [`Schema`] maps a type to the parser which encodes it, so nested types
//! compose without spelling out their parsers. `#[derive(Schema)]` implements
//! it for structs with named fields (via [`Record`]) and for fieldless enums.
//!
//! `Vec<u8>` is an array of `u8` here. Use
//! `#[schema(with = "BinaryParser::new")]` on a field to store raw bytes.

use std::{collections::BTreeMap, time::SystemTime};

use num_bigint::BigInt;

use crate::{
	parsers::{
		object_magic, ArrayParser, BigIntParser, BooleanParser, DateParser, MapParser, NullableParser,
		NumberParser, StringParser, TupleParser,
	},
	DecodeContext, EncodeContext, Parser, Result,
};

/// Type with a canonical parser.
pub trait Schema: Sized {
	type Parser: Parser<Value = Self>;

	fn parser() -> Self::Parser;
}

macro_rules! impl_schema {
	($ty:ty, $parser:ty, $ctor:expr) => {
		impl Schema for $ty {
			type Parser = $parser;

			#[inline]
			fn parser() -> $parser {
				$ctor
			}
		}
	};
}

macro_rules! impl_schema_for_numbers {
	($($ty:ty),+) => {
		$(impl_schema!($ty, NumberParser<$ty>, NumberParser::new());)+
	};
}

impl_schema_for_numbers!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
impl_schema!(bool, BooleanParser, BooleanParser::new());
impl_schema!(String, StringParser, StringParser::new());
impl_schema!(BigInt, BigIntParser, BigIntParser::signed());
impl_schema!(SystemTime, DateParser, DateParser::new());

impl<T: Schema> Schema for Option<T> {
	type Parser = NullableParser<T::Parser>;

	fn parser() -> Self::Parser {
		NullableParser::new(T::parser())
	}
}

impl<T: Schema> Schema for Vec<T> {
	type Parser = ArrayParser<T::Parser>;

	fn parser() -> Self::Parser {
		ArrayParser::new(T::parser())
	}
}

impl<K: Schema + Ord, V: Schema> Schema for BTreeMap<K, V> {
	type Parser = MapParser<K::Parser, V::Parser>;

	fn parser() -> Self::Parser {
		MapParser::new(K::parser(), V::parser())
	}
}

macro_rules! impl_schema_for_tuple {
	($($name:ident),+) => {
		impl<$($name: Schema),+> Schema for ($($name,)+) {
			type Parser = TupleParser<($($name::Parser,)+)>;

			fn parser() -> Self::Parser {
				TupleParser::new(($($name::parser(),)+))
			}
		}
	};
}

impl_schema_for_tuple!(A);
impl_schema_for_tuple!(A, B);
impl_schema_for_tuple!(A, B, C);
impl_schema_for_tuple!(A, B, C, D);
impl_schema_for_tuple!(A, B, C, D, E);
impl_schema_for_tuple!(A, B, C, D, E, F);
impl_schema_for_tuple!(A, B, C, D, E, F, G);
impl_schema_for_tuple!(A, B, C, D, E, F, G, H);
impl_schema_for_tuple!(A, B, C, D, E, F, G, H, I);
impl_schema_for_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_schema_for_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_schema_for_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Struct encoded like an [`ObjectParser`](crate::ObjectParser) whose keys are
/// the struct's fields.
///
/// Implemented by `#[derive(Schema)]`. Fields are visited in ordinal order of
/// their keys, so a record and an `ObjectParser` with the same keys and field
/// parsers share an identity tag and a wire layout.
pub trait Record: Sized {
	/// Parsers of all fields, built once per [`RecordParser`].
	type Fields;

	fn fields() -> Self::Fields;

	/// `(key, identity tag)` of each field, in ordinal key order.
	fn keys(fields: &Self::Fields) -> Vec<(&'static str, u32)>;

	fn encode_fields(&self, fields: &Self::Fields, ctx: &mut EncodeContext) -> Result<()>;

	fn decode_fields(fields: &Self::Fields, ctx: &mut DecodeContext) -> Result<Self>;
}

/// Parser of a [`Record`].
pub struct RecordParser<R: Record> {
	fields: R::Fields,
	magic: u32,
}

impl<R: Record> RecordParser<R> {
	pub fn new() -> Self {
		let fields = R::fields();
		let keys = R::keys(&fields);
		debug_assert!(keys.windows(2).all(|pair| pair[0].0 < pair[1].0));
		let magic = object_magic(keys);
		Self { fields, magic }
	}

	pub fn fields(&self) -> &R::Fields {
		&self.fields
	}
}

impl<R: Record> Default for RecordParser<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Record> Parser for RecordParser<R> {
	type Value = R;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	#[inline]
	fn encode_into(&self, ctx: &mut EncodeContext, value: &R) -> Result<()> {
		value.encode_fields(&self.fields, ctx)
	}

	#[inline]
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<R> {
		R::decode_fields(&self.fields, ctx)
	}
}
