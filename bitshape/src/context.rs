//! Encode and decode contexts, and the container format they produce and
//! consume.
//!
//! ```text
//! [4 bytes]  identity tag, u32 little-endian
//! [1 byte]   flags: bit 0 = body compressed, bit 1 = bit field compressed
//! [varint]   length of bit field segment as stored
//! [N bytes]  bit field segment
//! [M bytes]  body segment (rest of buffer)
//! ```
//!
//! One context serves a whole top-level call. Every parser in the tree writes
//! its bits to the single shared bit field and its bytes to the single shared
//! body, so bits from the whole tree pack densely together.

use tracing::trace;

use crate::{
	compress,
	io::{BitIo, ByteIo},
	transport,
	util::{decode_index, decode_length, encode_index, encode_length},
	DynamicParser, EncodeOptions, Error, Parser, Payload, Result, Value,
};

pub const FLAG_BODY_COMPRESSED: u8 = 0b0000_0001;
pub const FLAG_BIT_FIELD_COMPRESSED: u8 = 0b0000_0010;

/// State of one top-level encode.
pub struct EncodeContext {
	magic: u32,
	options: EncodeOptions,
	bit_field: BitIo,
	body: ByteIo,
	stack: Vec<u32>,
}

impl EncodeContext {
	/// Create context for encoding a value of the parser with identity `magic`.
	pub fn new(magic: u32, options: EncodeOptions) -> Self {
		Self {
			magic,
			options,
			bit_field: BitIo::new(),
			body: ByteIo::new(),
			stack: Vec::new(),
		}
	}

	/// Encode `value` with `parser`. Parsers call this for their children.
	pub fn encode<P: Parser + ?Sized>(&mut self, parser: &P, value: &P::Value) -> Result<()> {
		self.stack.push(parser.magic());
		let result = parser.encode_into(self, value);
		self.stack.pop();
		result
	}

	/// Encode a dynamic `value` with `parser`.
	pub fn encode_value<P: DynamicParser + ?Sized>(&mut self, parser: &P, value: &Value) -> Result<()> {
		self.stack.push(parser.magic());
		let result = parser.encode_value(self, value);
		self.stack.pop();
		result
	}

	#[inline]
	pub fn bit_field(&mut self) -> &mut BitIo {
		&mut self.bit_field
	}

	#[inline]
	pub fn body(&mut self) -> &mut ByteIo {
		&mut self.body
	}

	/// Identity tags of the parsers currently being encoded, outermost first.
	#[inline]
	pub fn stack(&self) -> &[u32] {
		&self.stack
	}

	#[inline]
	pub fn put_bit(&mut self, set: bool) {
		self.bit_field.put_bit(set);
	}

	/// Write `index` out of `length` alternatives with the adaptive index codec.
	#[inline]
	pub fn put_index(&mut self, index: usize, length: usize) -> Result<()> {
		encode_index(&mut self.bit_field, &mut self.body, index, length)
	}

	/// Write a length or count to the body.
	#[inline]
	pub fn put_length(&mut self, len: usize) {
		encode_length(&mut self.body, len);
	}

	/// Frame both streams into a container.
	pub fn finish(self) -> Result<Vec<u8>> {
		let Self {
			magic,
			options,
			bit_field,
			body,
			..
		} = self;

		let mut out = ByteIo::new();
		out.put_bytes(&magic.to_le_bytes());
		let flags = out.withhold_byte();

		let (bit_field_compressed, bit_field) = compress_segment(&options, bit_field.into_vec())?;
		encode_length(&mut out, bit_field.len());
		out.put_bytes(&bit_field);

		let (body_compressed, body) = compress_segment(&options, body.into_vec())?;
		out.put_bytes(&body);

		let mut flag_bits = 0;
		if body_compressed {
			flag_bits |= FLAG_BODY_COMPRESSED;
		}
		if bit_field_compressed {
			flag_bits |= FLAG_BIT_FIELD_COMPRESSED;
		}
		out.fill_withheld(flags, flag_bits);

		trace!(
			magic,
			bit_field_len = bit_field.len(),
			bit_field_compressed,
			body_len = body.len(),
			body_compressed,
			"encoded container"
		);

		Ok(out.into_vec())
	}
}

/// State of one top-level decode.
pub struct DecodeContext {
	bit_field: BitIo,
	body: ByteIo,
	stack: Vec<u32>,
}

impl DecodeContext {
	/// Parse container framing and restore both streams.
	///
	/// Fails with [`Error::SchemaMismatch`] if the container was not produced by
	/// a parser with identity `magic`.
	pub fn new(magic: u32, payload: Payload<'_>) -> Result<Self> {
		let bytes = match payload {
			Payload::Bytes(bytes) => bytes.to_vec(),
			Payload::Text(text) => transport::decode(text)?,
		};
		let mut header = ByteIo::from_vec(bytes);

		let found = u32::from_le_bytes(header.get_array()?);
		if found != magic {
			return Err(Error::SchemaMismatch {
				expected: magic,
				found,
			});
		}

		let flags = header.get_byte()?;

		let bit_field_len = decode_length(&mut header)?;
		let bit_field = header.get_bytes(bit_field_len)?;
		let bit_field = decompress(bit_field, flags & FLAG_BIT_FIELD_COMPRESSED != 0)?;

		let body = header.get_rest();
		let body = decompress(body, flags & FLAG_BODY_COMPRESSED != 0)?;

		trace!(
			magic,
			flags,
			bit_field_len = bit_field.len(),
			body_len = body.len(),
			"decoded container"
		);

		Ok(Self {
			bit_field: BitIo::from_vec(bit_field),
			body: ByteIo::from_vec(body),
			stack: Vec::new(),
		})
	}

	/// Decode a value with `parser`. Parsers call this for their children.
	pub fn decode<P: Parser + ?Sized>(&mut self, parser: &P) -> Result<P::Value> {
		self.stack.push(parser.magic());
		let result = parser.decode_from(self);
		self.stack.pop();
		result
	}

	#[inline]
	pub fn bit_field(&mut self) -> &mut BitIo {
		&mut self.bit_field
	}

	#[inline]
	pub fn body(&mut self) -> &mut ByteIo {
		&mut self.body
	}

	/// Identity tags of the parsers currently being decoded, outermost first.
	#[inline]
	pub fn stack(&self) -> &[u32] {
		&self.stack
	}

	#[inline]
	pub fn get_bit(&mut self) -> Result<bool> {
		self.bit_field.get_bit()
	}

	/// Read an index out of `length` alternatives with the adaptive index codec.
	#[inline]
	pub fn get_index(&mut self, length: usize) -> Result<usize> {
		decode_index(&mut self.bit_field, &mut self.body, length)
	}

	/// Read a length or count from the body.
	#[inline]
	pub fn get_length(&mut self) -> Result<usize> {
		decode_length(&mut self.body)
	}
}

/// Compress a segment if options allow and it pays off.
fn compress_segment(options: &EncodeOptions, data: Vec<u8>) -> Result<(bool, Vec<u8>)> {
	if !options.compressed {
		return Ok((false, data));
	}
	let compressed = compress::deflate(&data)?;
	if compressed.len() < data.len() || options.force_compressed {
		Ok((true, compressed))
	} else {
		Ok((false, data))
	}
}

fn decompress(data: &[u8], compressed: bool) -> Result<Vec<u8>> {
	if compressed {
		compress::inflate(data)
	} else {
		Ok(data.to_vec())
	}
}
