use super::ByteIo;
use crate::{Error, Result};

/// Bit-addressed stream on top of a [`ByteIo`].
///
/// Bits fill each byte from least significant to most significant. After the
/// 8th bit the byte cursor advances and the bit cursor returns to 0.
///
/// Writing a bit ORs it into the current byte. Bits are never cleared, so each
/// bit position must be written at most once, in increasing order. All parsers
/// only ever append, which satisfies this.
#[derive(Clone, Debug, Default)]
pub struct BitIo {
	io: ByteIo,
	bit_pos: u8,
}

impl BitIo {
	pub fn new() -> Self {
		Self {
			io: ByteIo::new(),
			bit_pos: 0,
		}
	}

	/// Wrap existing bytes for reading.
	pub fn from_vec(buf: Vec<u8>) -> Self {
		Self {
			io: ByteIo::from_vec(buf),
			bit_pos: 0,
		}
	}

	/// Length in whole bytes touched so far. A partially filled trailing byte is
	/// only counted once flushed.
	#[inline]
	pub fn len(&self) -> usize {
		self.io.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.io.is_empty()
	}

	#[inline]
	pub fn pos(&self) -> usize {
		self.io.pos()
	}

	#[inline]
	pub fn bit_pos(&self) -> u8 {
		self.bit_pos
	}

	/// Move byte cursor. Stream is byte-aligned afterwards.
	#[inline]
	pub fn set_pos(&mut self, pos: usize) {
		self.bit_pos = 0;
		self.io.set_pos(pos);
	}

	/// Step bit cursor forward by one, rolling into the next byte after 8 bits.
	#[inline]
	fn advance_bit(&mut self) {
		self.bit_pos += 1;
		if self.bit_pos == 8 {
			self.set_pos(self.io.pos() + 1);
		}
	}

	pub fn put_bit(&mut self, set: bool) {
		self.io.reserve(1);
		let pos = self.io.pos();
		*self.io.byte_at_mut(pos) |= (set as u8) << self.bit_pos;
		self.advance_bit();
	}

	pub fn get_bit(&mut self) -> Result<bool> {
		let pos = self.io.pos();
		let byte = match self.io.byte_at(pos) {
			Some(byte) if pos < self.io.len() => byte,
			_ => {
				return Err(Error::UnexpectedEnd {
					needed: 1,
					available: 0,
				})
			}
		};
		let set = byte & (1 << self.bit_pos) != 0;
		self.advance_bit();
		Ok(set)
	}

	/// Write low `num_bits` bits of `value`, least significant first.
	pub fn put_bits(&mut self, value: u64, num_bits: u32) {
		debug_assert!(num_bits <= 64);
		for i in 0..num_bits {
			self.put_bit((value >> i) & 1 == 1);
		}
	}

	/// Read `num_bits` bits, least significant first.
	pub fn get_bits(&mut self, num_bits: u32) -> Result<u64> {
		debug_assert!(num_bits <= 64);
		let mut value = 0;
		for i in 0..num_bits {
			value |= (self.get_bit()? as u64) << i;
		}
		Ok(value)
	}

	/// Pad a partially filled byte and move to the next byte boundary.
	pub fn flush(&mut self) {
		if self.bit_pos != 0 {
			self.set_pos(self.io.pos() + 1);
		}
	}

	/// Flush, then return exactly the bytes touched.
	pub fn into_vec(mut self) -> Vec<u8> {
		self.flush();
		self.io.into_vec()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bits_pack_lsb_first() {
		let mut bits = BitIo::new();
		bits.put_bit(true);
		bits.put_bit(false);
		bits.put_bit(true);
		assert_eq!(bits.bit_pos(), 3);
		assert_eq!(bits.into_vec(), vec![0b101]);
	}

	#[test]
	fn ninth_bit_starts_next_byte() {
		let mut bits = BitIo::new();
		bits.put_bits(0x1FF, 9);
		assert_eq!(bits.pos(), 1);
		assert_eq!(bits.bit_pos(), 1);
		assert_eq!(bits.into_vec(), vec![0xFF, 0x01]);
	}

	#[test]
	fn flush_on_boundary_is_noop() {
		let mut bits = BitIo::new();
		bits.put_bits(0xA5, 8);
		bits.flush();
		assert_eq!(bits.into_vec(), vec![0xA5]);

		assert!(BitIo::new().into_vec().is_empty());
	}

	#[test]
	fn set_pos_realigns() {
		let mut bits = BitIo::new();
		bits.put_bits(0b11, 2);
		bits.set_pos(2);
		assert_eq!(bits.bit_pos(), 0);
		bits.put_bit(true);
		assert_eq!(bits.into_vec(), vec![0b11, 0, 1]);
	}

	#[test]
	fn set_pos_past_storage() {
		let mut bits = BitIo::from_vec(Vec::new());
		bits.set_pos(4);
		bits.put_bit(true);
		assert_eq!(bits.into_vec(), vec![0, 0, 0, 0, 1]);

		let mut bits = BitIo::from_vec(vec![0xFF]);
		bits.set_pos(3);
		assert_eq!(bits.into_vec(), vec![0xFF, 0, 0]);
	}

	#[test]
	fn read_back() {
		let mut bits = BitIo::from_vec(vec![0b1011_0110, 0b1]);
		assert!(!bits.get_bit().unwrap());
		assert_eq!(bits.get_bits(7).unwrap(), 0b101_1011);
		assert!(bits.get_bit().unwrap());
		bits.flush();
		assert!(bits.get_bit().is_err());
	}
}
