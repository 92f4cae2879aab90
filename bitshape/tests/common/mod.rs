#![allow(dead_code)]

use std::fmt::Debug;

use bitshape::{EncodeOptions, Parser};

mod telemetry_data;
pub use telemetry_data::{generate_data as generate_telemetry_data, Network, Severity};

/// Every combination of compression and transport options.
pub fn all_options() -> Vec<EncodeOptions> {
	let mut all = vec![];
	for compressed in [false, true] {
		for force_compressed in [false, true] {
			for (base64, url_safe) in [(false, false), (true, false), (true, true)] {
				all.push(
					EncodeOptions::new()
						.with_compressed(compressed)
						.with_force_compressed(force_compressed)
						.with_base64(base64)
						.with_base64_url_safe(url_safe),
				);
			}
		}
	}
	all
}

/// Encode `value` with every set of options and check it decodes back unchanged.
pub fn assert_round_trip<P>(parser: &P, value: &P::Value)
where
	P: Parser,
	P::Value: Debug + PartialEq,
{
	for options in all_options() {
		let encoded = parser.encode(value, &options).unwrap();
		assert_eq!(encoded.as_text().is_some(), options.base64);
		let decoded = parser.decode(&encoded).unwrap();
		assert_eq!(&decoded, value, "options: {options:?}");
	}
}

/// Encode without compression and return raw container bytes.
pub fn encode_raw<P: Parser>(parser: &P, value: &P::Value) -> Vec<u8> {
	parser
		.encode(value, &EncodeOptions::new().with_compressed(false))
		.unwrap()
		.into_bytes()
}

/// Split raw container bytes into `(magic, flags, bit field, body)`.
///
/// Only handles bit fields shorter than 128 bytes (single byte length).
pub fn split_container(bytes: &[u8]) -> (u32, u8, &[u8], &[u8]) {
	let magic = u32::from_le_bytes(bytes[..4].try_into().unwrap());
	let flags = bytes[4];
	assert_eq!(bytes[5] & 1, 0, "bit field length longer than one byte");
	let bit_field_len = (bytes[5] >> 1) as usize;
	let bit_field = &bytes[6..6 + bit_field_len];
	let body = &bytes[6 + bit_field_len..];
	(magic, flags, bit_field, body)
}
