use std::io;

use thiserror::Error;

/// Errors produced while building a schema, encoding or decoding.
///
/// Every failure is fatal for the call which produced it. There is no partial
/// output: `encode` returns no buffer and `decode` returns no value.
#[derive(Error, Debug)]
pub enum Error {
	/// Identity tag in container does not match the schema used to decode it.
	#[error("schema mismatch: expected {expected:#010x} got {found:#010x}")]
	SchemaMismatch { expected: u32, found: u32 },

	/// Codec was given a value it cannot represent.
	#[error("invalid argument: {0}")]
	InvalidArgument(&'static str),

	/// Index outside the cardinality of an adaptive index.
	#[error("index {index} out of range for {length} alternatives")]
	OutOfRange { index: u64, length: usize },

	/// Branch-by-key variant declares the discriminant key as one of its own fields.
	#[error("variant `{variant}` declares discriminant key `{key}` as a field")]
	EncodingConflict { variant: String, key: String },

	/// Input ended before a read completed.
	#[error("unexpected end of input: need {needed} bytes, have {available}")]
	UnexpectedEnd { needed: usize, available: usize },

	/// Decoded integer does not fit the type it is decoded into.
	#[error("integer overflow while decoding")]
	Overflow,

	/// Text segment is not valid UTF-8.
	#[error("invalid UTF-8 in text")]
	InvalidUtf8,

	/// Branch tag or enum value is not declared by the schema.
	#[error("unknown tag `{0}`")]
	UnknownTag(String),

	/// Object value is missing a key the schema declares.
	#[error("missing field `{0}`")]
	MissingField(String),

	/// Dynamic value has a different shape than the parser expects.
	#[error("type mismatch: expected {expected}")]
	TypeMismatch { expected: &'static str },

	/// Tuple value has a different length than the schema declares.
	#[error("tuple arity mismatch: expected {expected}, found {found}")]
	ArityMismatch { expected: usize, found: usize },

	#[error("compression failed: {0}")]
	Compression(#[from] io::Error),

	#[error("transport decoding failed: {0}")]
	Transport(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
