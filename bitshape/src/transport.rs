//! Base64 transport encoding of container bytes.

use base64::{
	alphabet,
	engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
	Engine,
};

use crate::Result;

const ENCODE_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new();
const DECODE_CONFIG: GeneralPurposeConfig =
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, ENCODE_CONFIG);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, ENCODE_CONFIG);
const STANDARD_DECODE: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, DECODE_CONFIG);
const URL_SAFE_DECODE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, DECODE_CONFIG);

/// Encode bytes as padded base64, with the URL-safe alphabet if `url_safe`.
pub fn encode(data: &[u8], url_safe: bool) -> String {
	if url_safe {
		URL_SAFE.encode(data)
	} else {
		STANDARD.encode(data)
	}
}

/// Decode base64 in either alphabet. Padding is optional.
pub fn decode(text: &str) -> Result<Vec<u8>> {
	let text = text.trim();
	let engine = if text.contains(&['-', '_'][..]) {
		&URL_SAFE_DECODE
	} else {
		&STANDARD_DECODE
	};
	Ok(engine.decode(text)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn alphabets() {
		let data = [0xFB, 0xFF, 0xBF];
		assert_eq!(encode(&data, false), "+/+/");
		assert_eq!(encode(&data, true), "-_-_");
		assert_eq!(decode("+/+/").unwrap(), data);
		assert_eq!(decode("-_-_").unwrap(), data);
	}

	#[test]
	fn padding_optional() {
		assert_eq!(decode("AQI=").unwrap(), vec![1, 2]);
		assert_eq!(decode("AQI").unwrap(), vec![1, 2]);
	}

	#[test]
	fn invalid_text_fails() {
		assert!(decode("not base64!").is_err());
	}
}
