use bitshape::{
	util::hash_str, AnyParser, ArrayParser, BooleanParser, DynamicParser, EncodeOptions, Encoded,
	Error, NumberParser, ObjectParser, Parser, Schema, StringParser, Value, FLAG_BIT_FIELD_COMPRESSED,
	FLAG_BODY_COMPRESSED,
};

mod common;
use common::{encode_raw, split_container};

fn user_parser() -> ObjectParser<AnyParser> {
	ObjectParser::new([
		("id", NumberParser::<u32>::new().boxed()),
		("name", StringParser::new().boxed()),
		("active", BooleanParser::new().boxed()),
	])
}

fn user() -> Value {
	Value::object([
		("id", Value::from(7u32)),
		("name", Value::from("ok")),
		("active", Value::from(true)),
	])
}

#[test]
fn object_layout() {
	let parser = user_parser().boxed();
	let bytes = encode_raw(&parser, &user());

	let (magic, flags, bit_field, body) = split_container(&bytes);
	assert_eq!(magic, parser.magic());
	assert_eq!(flags, 0);
	// `active` is the only bit
	assert_eq!(bit_field, &[0b1]);
	// `id` as 4 bytes, then length-prefixed "ok"
	assert_eq!(body, &[7, 0, 0, 0, 2 << 1, b'o', b'k']);
	assert_eq!(bytes.len(), 14);

	assert_eq!(parser.decode(&bytes).unwrap(), user());
}

#[derive(Schema, Debug, PartialEq)]
struct User {
	id: u32,
	name: String,
	active: bool,
}

#[test]
fn derived_record_matches_object() {
	let record = User {
		id: 7,
		name: "ok".to_string(),
		active: true,
	};
	let parser = User::parser();
	assert_eq!(parser.magic(), user_parser().magic());

	let bytes = encode_raw(&parser, &record);
	assert_eq!(bytes, encode_raw(&user_parser().boxed(), &user()));

	// Payloads are interchangeable
	assert_eq!(user_parser().boxed().decode(&bytes).unwrap(), user());
}

#[test]
fn empty_streams() {
	let parser = ArrayParser::new(BooleanParser::new());
	let bytes = encode_raw(&parser, &vec![]);
	let (_, flags, bit_field, body) = split_container(&bytes);
	assert_eq!(flags, 0);
	assert!(bit_field.is_empty());
	assert_eq!(body, &[0]);
}

#[test]
fn small_segments_stored_raw() {
	let parser = user_parser().boxed();
	let encoded = parser.encode(&user(), &EncodeOptions::new()).unwrap();
	let (_, flags, _, _) = split_container(encoded.as_bytes());
	assert_eq!(flags, 0);
	assert_eq!(encoded.into_bytes(), encode_raw(&parser, &user()));
}

#[test]
fn forced_compression() {
	let parser = user_parser().boxed();
	let options = EncodeOptions::new().with_force_compressed(true);
	let encoded = parser.encode(&user(), &options).unwrap();
	assert_eq!(
		encoded.as_bytes()[4],
		FLAG_BODY_COMPRESSED | FLAG_BIT_FIELD_COMPRESSED
	);
	assert_eq!(parser.decode(&encoded).unwrap(), user());

	// Force has no effect when compression is off
	let options = options.with_compressed(false);
	let encoded = parser.encode(&user(), &options).unwrap();
	assert_eq!(encoded.as_bytes()[4], 0);
}

#[test]
fn large_body_compressed() {
	let parser = ArrayParser::new(StringParser::new());
	let value = vec!["hello".to_string(); 1000];
	let encoded = parser.encode(&value, &EncodeOptions::new()).unwrap();
	let bytes = encoded.as_bytes();
	assert_eq!(bytes[4], FLAG_BODY_COMPRESSED);
	assert!(bytes.len() < 1000);
	assert_eq!(parser.decode(bytes).unwrap(), value);
}

#[test]
fn schema_mismatch() {
	let bytes = encode_raw(&NumberParser::<u32>::new(), &1);
	let result = NumberParser::<i32>::new().decode(&bytes);
	match result {
		Err(Error::SchemaMismatch { expected, found }) => {
			assert_eq!(expected, hash_str("NumberParser:i32"));
			assert_eq!(found, hash_str("NumberParser:u32"));
		}
		other => panic!("expected schema mismatch, got {other:?}"),
	}
}

#[test]
fn mismatch_is_checked_before_anything_else() {
	let bytes = encode_raw(&StringParser::new(), &"x".to_string());
	let other = ObjectParser::<AnyParser>::new([("x", StringParser::new().boxed())]);
	assert!(matches!(
		other.decode(&bytes),
		Err(Error::SchemaMismatch { .. })
	));
}

#[test]
fn truncated_input() {
	let parser = user_parser().boxed();
	let bytes = encode_raw(&parser, &user());

	for len in [0, 3, 4, 5, 6, bytes.len() - 1] {
		assert!(
			matches!(
				parser.decode(&bytes[..len]),
				Err(Error::UnexpectedEnd { .. })
			),
			"length {len}"
		);
	}
}

#[test]
fn trailing_bytes_ignored() {
	let parser = user_parser().boxed();
	let mut bytes = encode_raw(&parser, &user());
	bytes.extend_from_slice(&[0xFF, 0xFF]);
	assert_eq!(parser.decode(&bytes).unwrap(), user());
}

#[test]
fn corrupt_compressed_segment() {
	let parser = StringParser::new();
	let value = "abc".repeat(100);
	let mut bytes = parser
		.encode(&value, &EncodeOptions::new())
		.unwrap()
		.into_bytes();
	assert_eq!(bytes[4], FLAG_BODY_COMPRESSED);
	let last = bytes.len() - 1;
	bytes.truncate(last - 2);
	assert!(parser.decode(&bytes).is_err());
}

#[test]
fn compressed_body_missing_last_byte() {
	let parser = ArrayParser::new(StringParser::new());
	let value = vec!["hello".to_string(); 1000];
	let mut bytes = parser
		.encode(&value, &EncodeOptions::new())
		.unwrap()
		.into_bytes();
	assert_eq!(bytes[4], FLAG_BODY_COMPRESSED);
	bytes.pop();
	assert!(matches!(parser.decode(&bytes), Err(Error::Compression(_))));
}

#[test]
fn base64_transport() {
	let parser = user_parser().boxed();

	let options = EncodeOptions::new().with_base64(true);
	let encoded = parser.encode(&user(), &options).unwrap();
	let text = encoded.as_text().unwrap();
	assert!(text.chars().all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)));
	assert_eq!(parser.decode(text).unwrap(), user());
	assert_eq!(parser.decode(&text.to_string()).unwrap(), user());

	// Same container underneath
	let raw = parser.encode(&user(), &EncodeOptions::new()).unwrap();
	let Encoded::Bytes(raw) = raw else {
		panic!("expected bytes");
	};
	assert_eq!(text.len(), (raw.len() + 2) / 3 * 4);

	let url_safe = parser
		.encode(&user(), &options.with_base64_url_safe(true))
		.unwrap();
	let text = url_safe.as_text().unwrap();
	assert!(!text.contains(&['+', '/'][..]));
	assert_eq!(parser.decode(text).unwrap(), user());

	// Padding is optional
	assert_eq!(parser.decode(text.trim_end_matches('=')).unwrap(), user());
}

#[test]
fn invalid_base64() {
	let parser = BooleanParser::new();
	assert!(matches!(
		parser.decode("@@@@"),
		Err(Error::Transport(_))
	));
}
