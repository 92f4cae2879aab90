use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Fixed-arity positional sequence, each element encoded with its own parser.
///
/// `T` is either a Rust tuple of parsers (arity 1 to 12), with a matching
/// tuple of values, or a `Vec<P>` of parsers, with a `Vec` of values whose
/// length must equal the number of parsers.
#[derive(Clone, Debug)]
pub struct TupleParser<T> {
	elements: T,
	magic: u32,
}

/// Collections of parsers [`TupleParser`] can be built from.
pub trait TupleElements {
	fn magics(&self) -> Vec<u32>;
}

impl<T: TupleElements> TupleParser<T> {
	pub fn new(elements: T) -> Self {
		let magics = elements
			.magics()
			.iter()
			.map(u32::to_string)
			.collect::<Vec<_>>()
			.join(",");
		let magic = hash_str(&format!("TupleParser:{magics}"));
		Self { elements, magic }
	}

	pub fn elements(&self) -> &T {
		&self.elements
	}
}

macro_rules! impl_tuple {
	($len:literal; $($name:ident $idx:tt),+) => {
		impl<$($name: Parser),+> TupleElements for ($($name,)+) {
			fn magics(&self) -> Vec<u32> {
				vec![$(self.$idx.magic()),+]
			}
		}

		impl<$($name: Parser),+> Parser for TupleParser<($($name,)+)> {
			type Value = ($($name::Value,)+);

			#[inline]
			fn magic(&self) -> u32 {
				self.magic
			}

			fn encode_into(&self, ctx: &mut EncodeContext, value: &Self::Value) -> Result<()> {
				$(ctx.encode(&self.elements.$idx, &value.$idx)?;)+
				Ok(())
			}

			fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
				Ok(($(ctx.decode(&self.elements.$idx)?,)+))
			}
		}

		impl<$($name: DynamicParser),+> DynamicParser for TupleParser<($($name,)+)> {
			fn into_value(&self, value: Self::Value) -> Value {
				Value::Tuple(vec![$(self.elements.$idx.into_value(value.$idx)),+])
			}

			fn from_value(&self, value: &Value) -> Result<Self::Value> {
				let items = tuple_items(value, $len)?;
				Ok(($(self.elements.$idx.from_value(&items[$idx])?,)+))
			}

			fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
				let items = tuple_items(value, $len)?;
				$(ctx.encode_value(&self.elements.$idx, &items[$idx])?;)+
				Ok(())
			}
		}
	};
}

impl_tuple!(1; A 0);
impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);
impl_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(9; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple!(10; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_tuple!(11; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_tuple!(12; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

fn tuple_items(value: &Value, expected: usize) -> Result<&[Value]> {
	let Value::Tuple(items) = value else {
		return Err(mismatch("tuple"));
	};
	check_arity(expected, items.len())?;
	Ok(items)
}

#[inline]
fn check_arity(expected: usize, found: usize) -> Result<()> {
	if expected != found {
		return Err(Error::ArityMismatch { expected, found });
	}
	Ok(())
}

impl<P: Parser> TupleElements for Vec<P> {
	fn magics(&self) -> Vec<u32> {
		self.iter().map(Parser::magic).collect()
	}
}

impl<P: Parser> Parser for TupleParser<Vec<P>> {
	type Value = Vec<P::Value>;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &Vec<P::Value>) -> Result<()> {
		check_arity(self.elements.len(), value.len())?;
		for (parser, item) in self.elements.iter().zip(value) {
			ctx.encode(parser, item)?;
		}
		Ok(())
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Vec<P::Value>> {
		self.elements.iter().map(|parser| ctx.decode(parser)).collect()
	}
}

impl<P: DynamicParser> DynamicParser for TupleParser<Vec<P>> {
	fn into_value(&self, value: Vec<P::Value>) -> Value {
		Value::Tuple(
			self
				.elements
				.iter()
				.zip(value)
				.map(|(parser, item)| parser.into_value(item))
				.collect(),
		)
	}

	fn from_value(&self, value: &Value) -> Result<Vec<P::Value>> {
		let items = tuple_items(value, self.elements.len())?;
		self
			.elements
			.iter()
			.zip(items)
			.map(|(parser, item)| parser.from_value(item))
			.collect()
	}

	fn encode_value(&self, ctx: &mut EncodeContext, value: &Value) -> Result<()> {
		let items = tuple_items(value, self.elements.len())?;
		for (parser, item) in self.elements.iter().zip(items) {
			ctx.encode_value(parser, item)?;
		}
		Ok(())
	}
}
