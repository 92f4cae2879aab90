//! Raw deflate, applied to container segments.

use std::io::{self, Write};

use flate2::{write::DeflateEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::Result;

/// Compress `data` as a raw deflate stream (no zlib or gzip header).
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
	let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
	encoder.write_all(data)?;
	Ok(encoder.finish()?)
}

/// Decompress a raw deflate stream.
///
/// The stream must be complete. Input that ends before the final block does
/// is an error, not a shorter output.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = Decompress::new(false);
	let mut out = Vec::with_capacity(data.len() * 2 + 64);
	loop {
		if out.len() == out.capacity() {
			out.reserve(out.capacity().max(64));
		}

		let consumed = decoder.total_in() as usize;
		let produced = decoder.total_out();
		let status = decoder
			.decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)
			.map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

		match status {
			Status::StreamEnd => return Ok(out),
			_ if decoder.total_in() as usize == consumed && decoder.total_out() == produced => {
				return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated deflate stream").into());
			}
			_ => {}
		}
	}
}
