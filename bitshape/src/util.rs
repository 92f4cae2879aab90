//! Identity hashing, the variable-length integer codec and the adaptive index
//! codec.
//!
//! # Variable-length integers
//!
//! ```text
//! unsigned: NNNNNNNX [NNNNNNNX ...]
//! signed:   NNNNNNSX [NNNNNNNX ...]
//! ```
//!
//! `X` is the extension bit (another byte follows), `N` are value bits, least
//! significant group first, and `S` is the sign. Signed values store their
//! magnitude, so negative zero is representable and decodes as zero.

use num_bigint::{BigInt, BigUint, Sign};

use crate::{
	io::{BitIo, ByteIo},
	Error, Result,
};

/// 32-bit identity hash of a descriptive string.
///
/// `h = (h << 5) + h ^ c` over UTF-16 code units, seeded with 5381.
pub fn hash_str(s: &str) -> u32 {
	s.encode_utf16().fold(5381u32, |hash, unit| {
		(hash << 5).wrapping_add(hash) ^ unit as u32
	})
}

/// Identity string fragment for a list of keyed children: `key-tag,key-tag`.
///
/// `entries` must already be in ordinal key order.
pub(crate) fn keyed_magics<'a, I>(entries: I) -> String
where I: IntoIterator<Item = (&'a str, u32)> {
	entries
		.into_iter()
		.map(|(key, magic)| format!("{key}-{magic}"))
		.collect::<Vec<_>>()
		.join(",")
}

/// Write an arbitrary-precision integer.
///
/// Fails with [`Error::InvalidArgument`] for a negative value when `signed` is
/// false.
pub fn encode_bigint(io: &mut ByteIo, value: &BigInt, signed: bool) -> Result<()> {
	let negative = value.sign() == Sign::Minus;
	if negative && !signed {
		return Err(Error::InvalidArgument("negative value in unsigned context"));
	}

	let mut rest = value.magnitude().clone();
	let first = if signed {
		let low = low_byte(&rest) & 0b0011_1111;
		rest >>= 6;
		low << 2 | (negative as u8) << 1
	} else {
		let low = low_byte(&rest) & 0b0111_1111;
		rest >>= 7;
		low << 1
	};

	let mut more = rest.bits() != 0;
	io.put_byte(first | more as u8);
	while more {
		let low = low_byte(&rest) & 0b0111_1111;
		rest >>= 7;
		more = rest.bits() != 0;
		io.put_byte(low << 1 | more as u8);
	}
	Ok(())
}

/// Read an arbitrary-precision integer written by [`encode_bigint`].
pub fn decode_bigint(io: &mut ByteIo, signed: bool) -> Result<BigInt> {
	let mut byte = io.get_byte()?;
	let (mut value, negative, mut shift) = if signed {
		(BigUint::from(byte >> 2), byte & 0b10 != 0, 6usize)
	} else {
		(BigUint::from(byte >> 1), false, 7usize)
	};

	while byte & 1 == 1 {
		byte = io.get_byte()?;
		value |= BigUint::from(byte >> 1) << shift;
		shift += 7;
	}

	let sign = if negative { Sign::Minus } else { Sign::Plus };
	Ok(BigInt::from_biguint(sign, value))
}

#[inline]
fn low_byte(value: &BigUint) -> u8 {
	value.iter_u64_digits().next().unwrap_or(0) as u8
}

/// Write an unsigned integer. Same bytes as [`encode_bigint`] unsigned.
pub fn encode_varuint(io: &mut ByteIo, mut value: u64) {
	loop {
		let low = (value & 0b0111_1111) as u8;
		value >>= 7;
		let more = value != 0;
		io.put_byte(low << 1 | more as u8);
		if !more {
			break;
		}
	}
}

/// Read an unsigned integer written by [`encode_varuint`] or unsigned
/// [`encode_bigint`].
///
/// Fails with [`Error::Overflow`] if the value does not fit in a `u64`.
pub fn decode_varuint(io: &mut ByteIo) -> Result<u64> {
	let mut value = 0u64;
	let mut shift = 0u32;
	loop {
		let byte = io.get_byte()?;
		let group = (byte >> 1) as u64;
		if group != 0 {
			if shift >= 64 || (group << shift) >> shift != group {
				return Err(Error::Overflow);
			}
			value |= group << shift;
		}
		if byte & 1 == 0 {
			return Ok(value);
		}
		shift = shift.saturating_add(7);
	}
}

/// Write a length or count.
#[inline]
pub fn encode_length(io: &mut ByteIo, len: usize) {
	encode_varuint(io, len as u64);
}

/// Read a length or count.
#[inline]
pub fn decode_length(io: &mut ByteIo) -> Result<usize> {
	usize::try_from(decode_varuint(io)?).map_err(|_| Error::Overflow)
}

/// Write `index` of `length` alternatives at minimum cost.
///
/// * `length <= 1`: nothing is written.
/// * `length == 2`: one bit in `bits`.
/// * `length > 2`: a varint in `body`.
pub fn encode_index(bits: &mut BitIo, body: &mut ByteIo, index: usize, length: usize) -> Result<()> {
	if index >= length {
		return Err(Error::OutOfRange {
			index: index as u64,
			length,
		});
	}
	match length {
		0 | 1 => {}
		2 => bits.put_bit(index == 1),
		_ => encode_varuint(body, index as u64),
	}
	Ok(())
}

/// Read an index written by [`encode_index`].
pub fn decode_index(bits: &mut BitIo, body: &mut ByteIo, length: usize) -> Result<usize> {
	let index = match length {
		0 | 1 => 0,
		2 => bits.get_bit()? as u64,
		_ => decode_varuint(body)?,
	};
	if index >= length as u64 {
		return Err(Error::OutOfRange { index, length });
	}
	Ok(index as usize)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn encode_unsigned(value: u64) -> Vec<u8> {
		let mut io = ByteIo::new();
		encode_bigint(&mut io, &BigInt::from(value), false).unwrap();
		io.into_vec()
	}

	fn round_trip(value: BigInt, signed: bool) -> BigInt {
		let mut io = ByteIo::new();
		encode_bigint(&mut io, &value, signed).unwrap();
		let mut io = ByteIo::from_vec(io.into_vec());
		let out = decode_bigint(&mut io, signed).unwrap();
		assert_eq!(io.remaining(), 0);
		out
	}

	#[test]
	fn hash_matches_reference_values() {
		assert_eq!(hash_str(""), 5381);
		// 5381 * 33 ^ 'a'
		assert_eq!(hash_str("a"), (5381u32 * 33) ^ 97);
		assert_ne!(hash_str("BooleanParser"), hash_str("StringParser"));
	}

	#[test]
	fn unsigned_byte_boundaries() {
		assert_eq!(encode_unsigned(0), vec![0]);
		assert_eq!(encode_unsigned(127), vec![0b1111_1110]);
		assert_eq!(encode_unsigned(128), vec![0b0000_0001, 0b0000_0010]);
		assert_eq!(encode_unsigned(16383).len(), 2);
		assert_eq!(encode_unsigned(16384).len(), 3);
	}

	#[test]
	fn fast_path_matches_bigint() {
		for value in [0, 1, 63, 64, 127, 128, 300, u32::MAX as u64, u64::MAX] {
			let mut io = ByteIo::new();
			encode_varuint(&mut io, value);
			let fast = io.into_vec();
			assert_eq!(fast, encode_unsigned(value));

			let mut io = ByteIo::from_vec(fast);
			assert_eq!(decode_varuint(&mut io).unwrap(), value);
		}
	}

	#[test]
	fn varuint_overflow_detected() {
		let mut io = ByteIo::new();
		encode_bigint(&mut io, &(BigInt::from(u64::MAX) + 1), false).unwrap();
		let mut io = ByteIo::from_vec(io.into_vec());
		assert!(matches!(decode_varuint(&mut io), Err(Error::Overflow)));
	}

	#[test]
	fn signed_layout() {
		let mut io = ByteIo::new();
		encode_bigint(&mut io, &BigInt::from(-5), true).unwrap();
		assert_eq!(io.into_vec(), vec![5 << 2 | 0b10]);

		let mut io = ByteIo::new();
		encode_bigint(&mut io, &BigInt::from(64), true).unwrap();
		assert_eq!(io.into_vec(), vec![0b0000_0001, 0b0000_0010]);
	}

	#[test]
	fn signed_round_trips() {
		let big = BigInt::parse_bytes(b"-123456789012345678901234567890", 10).unwrap();
		for value in [
			BigInt::from(0),
			BigInt::from(63),
			BigInt::from(-64),
			BigInt::from(i64::MIN),
			big.clone(),
			-big,
		] {
			assert_eq!(round_trip(value.clone(), true), value);
		}
	}

	#[test]
	fn negative_zero_decodes_as_zero() {
		let mut io = ByteIo::from_vec(vec![0b10]);
		assert_eq!(decode_bigint(&mut io, true).unwrap(), BigInt::from(0));
	}

	#[test]
	fn negative_rejected_when_unsigned() {
		let mut io = ByteIo::new();
		assert!(matches!(
			encode_bigint(&mut io, &BigInt::from(-1), false),
			Err(Error::InvalidArgument(_))
		));
	}

	#[test]
	fn truncated_varint_fails() {
		let mut io = ByteIo::from_vec(vec![0b1]);
		assert!(matches!(
			decode_bigint(&mut io, false),
			Err(Error::UnexpectedEnd { .. })
		));
	}

	#[test]
	fn index_costs() {
		let mut bits = BitIo::new();
		let mut body = ByteIo::new();
		encode_index(&mut bits, &mut body, 0, 1).unwrap();
		assert_eq!((bits.pos(), bits.bit_pos(), body.len()), (0, 0, 0));
		encode_index(&mut bits, &mut body, 1, 2).unwrap();
		assert_eq!((bits.pos(), bits.bit_pos(), body.len()), (0, 1, 0));
		encode_index(&mut bits, &mut body, 2, 3).unwrap();
		assert_eq!((bits.pos(), bits.bit_pos(), body.len()), (0, 1, 1));

		let mut bits = BitIo::from_vec(bits.into_vec());
		let mut body = ByteIo::from_vec(body.into_vec());
		assert_eq!(decode_index(&mut bits, &mut body, 1).unwrap(), 0);
		assert_eq!(decode_index(&mut bits, &mut body, 2).unwrap(), 1);
		assert_eq!(decode_index(&mut bits, &mut body, 3).unwrap(), 2);
	}

	#[test]
	fn index_out_of_range() {
		let mut bits = BitIo::new();
		let mut body = ByteIo::new();
		for (index, length) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
			assert!(matches!(
				encode_index(&mut bits, &mut body, index, length),
				Err(Error::OutOfRange { .. })
			));
		}

		let mut bits = BitIo::new();
		let mut body = ByteIo::from_vec(vec![5 << 1]);
		assert!(matches!(
			decode_index(&mut bits, &mut body, 3),
			Err(Error::OutOfRange {
				index: 5,
				length: 3
			})
		));
	}
}
