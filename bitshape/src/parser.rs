use std::sync::Arc;

use crate::{transport, DecodeContext, EncodeContext, Result};

/// Schema node: a shape with an identity tag which can write values of that
/// shape into a context and read them back.
///
/// `encode_into` and `decode_from` must visit the streams in exactly the same
/// order, and must only touch the context's shared streams. Nested parsers are
/// driven through [`EncodeContext::encode`] / [`DecodeContext::decode`], never
/// with contexts of their own.
///
/// Parsers are immutable once built, so one schema can serve concurrent calls.
pub trait Parser {
	/// Rust type this parser encodes and decodes.
	type Value;

	/// Identity tag. Computed once at construction from the parser's kind,
	/// parameters and children's tags.
	fn magic(&self) -> u32;

	/// Write `value` into the context's streams.
	fn encode_into(&self, ctx: &mut EncodeContext, value: &Self::Value) -> Result<()>;

	/// Read a value from the context's streams.
	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value>;

	/// Encode `value` into a complete container.
	///
	/// ```
	/// use bitshape::{BooleanParser, EncodeOptions, Parser};
	///
	/// let parser = BooleanParser::new();
	/// let encoded = parser.encode(&true, &EncodeOptions::default()).unwrap();
	/// assert!(parser.decode(&encoded).unwrap());
	/// ```
	fn encode(&self, value: &Self::Value, options: &EncodeOptions) -> Result<Encoded>
	where Self: Sized {
		let mut ctx = EncodeContext::new(self.magic(), *options);
		ctx.encode(self, value)?;
		let bytes = ctx.finish()?;

		if options.base64 {
			tracing::trace!(url_safe = options.base64_url_safe, "transport encoding");
			Ok(Encoded::Text(transport::encode(&bytes, options.base64_url_safe)))
		} else {
			Ok(Encoded::Bytes(bytes))
		}
	}

	/// Decode a container produced by [`encode`](Parser::encode) with a parser
	/// of the same identity tag.
	fn decode<'a>(&self, input: impl Into<Payload<'a>>) -> Result<Self::Value>
	where Self: Sized {
		let mut ctx = DecodeContext::new(self.magic(), input.into())?;
		ctx.decode(self)
	}
}

macro_rules! impl_parser_for_pointer {
	($ptr:ident) => {
		impl<P: Parser + ?Sized> Parser for $ptr<P> {
			type Value = P::Value;

			#[inline]
			fn magic(&self) -> u32 {
				(**self).magic()
			}

			#[inline]
			fn encode_into(&self, ctx: &mut EncodeContext, value: &Self::Value) -> Result<()> {
				(**self).encode_into(ctx, value)
			}

			#[inline]
			fn decode_from(&self, ctx: &mut DecodeContext) -> Result<Self::Value> {
				(**self).decode_from(ctx)
			}
		}
	};
}

impl_parser_for_pointer!(Box);
impl_parser_for_pointer!(Arc);

/// Options for [`Parser::encode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
	/// Allow compressing segments. A segment is stored compressed only if that
	/// makes it smaller, unless `force_compressed` is set.
	///
	/// Default: `true`
	pub compressed: bool,
	/// Always store segments compressed, even when that makes them larger.
	///
	/// Default: `false`
	pub force_compressed: bool,
	/// Return base64 text instead of raw bytes.
	///
	/// Default: `false`
	pub base64: bool,
	/// Use the URL-safe base64 alphabet. Only has effect with `base64`.
	///
	/// Default: `false`
	pub base64_url_safe: bool,
}

impl EncodeOptions {
	pub const fn new() -> Self {
		Self {
			compressed: true,
			force_compressed: false,
			base64: false,
			base64_url_safe: false,
		}
	}

	pub const fn with_compressed(mut self, compressed: bool) -> Self {
		self.compressed = compressed;
		self
	}

	pub const fn with_force_compressed(mut self, force_compressed: bool) -> Self {
		self.force_compressed = force_compressed;
		self
	}

	pub const fn with_base64(mut self, base64: bool) -> Self {
		self.base64 = base64;
		self
	}

	pub const fn with_base64_url_safe(mut self, url_safe: bool) -> Self {
		self.base64_url_safe = url_safe;
		self
	}
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Output of [`Parser::encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Encoded {
	Bytes(Vec<u8>),
	/// Base64 of the container bytes.
	Text(String),
}

impl Encoded {
	/// Raw bytes, or the UTF-8 bytes of the base64 text.
	pub fn as_bytes(&self) -> &[u8] {
		match self {
			Encoded::Bytes(bytes) => bytes,
			Encoded::Text(text) => text.as_bytes(),
		}
	}

	/// Raw bytes, or the UTF-8 bytes of the base64 text.
	pub fn into_bytes(self) -> Vec<u8> {
		match self {
			Encoded::Bytes(bytes) => bytes,
			Encoded::Text(text) => text.into_bytes(),
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Encoded::Bytes(_) => None,
			Encoded::Text(text) => Some(text),
		}
	}

	pub fn len(&self) -> usize {
		self.as_bytes().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Input to [`Parser::decode`]. Text is base64 and is decoded before the
/// container is parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Payload<'a> {
	Bytes(&'a [u8]),
	Text(&'a str),
}

impl<'a> From<&'a [u8]> for Payload<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		Payload::Bytes(bytes)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		Payload::Bytes(bytes)
	}
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
	fn from(bytes: &'a Vec<u8>) -> Self {
		Payload::Bytes(bytes)
	}
}

impl<'a> From<&'a str> for Payload<'a> {
	fn from(text: &'a str) -> Self {
		Payload::Text(text)
	}
}

impl<'a> From<&'a String> for Payload<'a> {
	fn from(text: &'a String) -> Self {
		Payload::Text(text)
	}
}

impl<'a> From<&'a Encoded> for Payload<'a> {
	fn from(encoded: &'a Encoded) -> Self {
		match encoded {
			Encoded::Bytes(bytes) => Payload::Bytes(bytes),
			Encoded::Text(text) => Payload::Text(text),
		}
	}
}
