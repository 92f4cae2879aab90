use crate::{Error, Result};

/// Initial capacity of a [`ByteIo`] created with [`ByteIo::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Extra bytes allocated whenever a [`ByteIo`] has to grow, so a run of small
/// writes does not reallocate on every call.
pub const GROWTH_SLACK: usize = 1024;

/// Growable byte buffer with a read/write cursor.
///
/// `len` is the high-water mark of every position the cursor has reached, not
/// just the bytes explicitly written. Storage beyond `len` is slack and is
/// dropped by [`into_vec`](ByteIo::into_vec).
///
/// Reads never go past `len`. Doing so returns [`Error::UnexpectedEnd`].
#[derive(Clone, Debug)]
pub struct ByteIo {
	buf: Vec<u8>,
	len: usize,
	pos: usize,
}

/// Handle to a byte reserved by [`ByteIo::withhold_byte`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Withheld(usize);

impl ByteIo {
	/// Create empty buffer for writing.
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}

	/// Create empty buffer for writing with pre-allocated capacity.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: vec![0; capacity],
			len: 0,
			pos: 0,
		}
	}

	/// Wrap existing bytes for reading. `len` is the full length of `buf`.
	pub fn from_vec(buf: Vec<u8>) -> Self {
		let len = buf.len();
		Self { buf, len, pos: 0 }
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	#[inline]
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Move cursor. Moving past `len` extends `len`, zero-filling any storage
	/// the cursor skips over.
	#[inline]
	pub fn set_pos(&mut self, pos: usize) {
		if pos > self.buf.len() {
			self.buf.resize(pos + GROWTH_SLACK, 0);
		}
		if pos > self.len {
			self.len = pos;
		}
		self.pos = pos;
	}

	/// Bytes between cursor and `len`.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.len.saturating_sub(self.pos)
	}

	/// Ensure at least `additional` bytes of storage past the cursor.
	pub fn reserve(&mut self, additional: usize) {
		let required = self.pos + additional;
		if self.buf.len() < required {
			let new_len = required.max(self.buf.len() + additional) + GROWTH_SLACK;
			self.buf.resize(new_len, 0);
		}
	}

	pub fn get_byte(&mut self) -> Result<u8> {
		self.check_available(1)?;
		let byte = self.buf[self.pos];
		self.set_pos(self.pos + 1);
		Ok(byte)
	}

	/// Read `len` raw bytes.
	pub fn get_bytes(&mut self, len: usize) -> Result<&[u8]> {
		self.check_available(len)?;
		let start = self.pos;
		self.set_pos(start + len);
		Ok(&self.buf[start..start + len])
	}

	/// Read a fixed number of raw bytes.
	pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0; N];
		out.copy_from_slice(self.get_bytes(N)?);
		Ok(out)
	}

	/// Read every byte from cursor to `len`.
	pub fn get_rest(&mut self) -> &[u8] {
		let start = self.pos.min(self.len);
		self.set_pos(self.len);
		&self.buf[start..self.len]
	}

	pub fn put_byte(&mut self, byte: u8) {
		self.reserve(1);
		self.buf[self.pos] = byte;
		self.set_pos(self.pos + 1);
	}

	pub fn put_bytes(&mut self, bytes: &[u8]) {
		self.reserve(bytes.len());
		let start = self.pos;
		self.buf[start..start + bytes.len()].copy_from_slice(bytes);
		self.set_pos(start + bytes.len());
	}

	/// Reserve one byte at the cursor and step past it.
	///
	/// Its final value is written later with [`fill_withheld`](ByteIo::fill_withheld),
	/// once it is known.
	pub fn withhold_byte(&mut self) -> Withheld {
		self.reserve(1);
		let pos = self.pos;
		self.set_pos(pos + 1);
		Withheld(pos)
	}

	/// Write the final value of a byte reserved by
	/// [`withhold_byte`](ByteIo::withhold_byte). Cursor does not move.
	pub fn fill_withheld(&mut self, withheld: Withheld, byte: u8) {
		self.buf[withheld.0] = byte;
	}

	/// Byte at `pos` without moving the cursor. `pos` must be within storage.
	#[inline]
	pub(crate) fn byte_at(&self, pos: usize) -> Option<u8> {
		self.buf.get(pos).copied()
	}

	#[inline]
	pub(crate) fn byte_at_mut(&mut self, pos: usize) -> &mut u8 {
		&mut self.buf[pos]
	}

	/// Consume buffer, returning exactly `len` bytes.
	pub fn into_vec(mut self) -> Vec<u8> {
		self.buf.truncate(self.len);
		self.buf.shrink_to_fit();
		self.buf
	}

	#[inline]
	fn check_available(&self, needed: usize) -> Result<()> {
		let available = self.remaining();
		if needed > available {
			return Err(Error::UnexpectedEnd { needed, available });
		}
		Ok(())
	}
}

impl Default for ByteIo {
	fn default() -> Self {
		Self::new()
	}
}
