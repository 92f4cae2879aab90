use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_bigint::BigInt;

use super::BigIntParser;
use crate::{
	util::hash_str,
	value::{mismatch, DynamicParser, Value},
	DecodeContext, EncodeContext, Error, Parser, Result,
};

/// Instant in time, stored as unsigned milliseconds since the Unix epoch.
///
/// Precision below one millisecond is dropped. Instants before the epoch are
/// rejected with [`Error::InvalidArgument`].
#[derive(Clone, Debug)]
pub struct DateParser {
	millis: BigIntParser,
	magic: u32,
}

impl DateParser {
	pub fn new() -> Self {
		Self {
			millis: BigIntParser::unsigned(),
			magic: hash_str("DateParser"),
		}
	}
}

impl Default for DateParser {
	fn default() -> Self {
		Self::new()
	}
}

impl Parser for DateParser {
	type Value = SystemTime;

	#[inline]
	fn magic(&self) -> u32 {
		self.magic
	}

	fn encode_into(&self, ctx: &mut EncodeContext, value: &SystemTime) -> Result<()> {
		let since_epoch = value
			.duration_since(UNIX_EPOCH)
			.map_err(|_| Error::InvalidArgument("date before unix epoch"))?;
		ctx.encode(&self.millis, &BigInt::from(since_epoch.as_millis()))
	}

	fn decode_from(&self, ctx: &mut DecodeContext) -> Result<SystemTime> {
		let millis = ctx.decode(&self.millis)?;
		let millis = u64::try_from(&millis).map_err(|_| Error::Overflow)?;
		UNIX_EPOCH
			.checked_add(Duration::from_millis(millis))
			.ok_or(Error::Overflow)
	}
}

impl DynamicParser for DateParser {
	fn into_value(&self, value: SystemTime) -> Value {
		Value::Date(value)
	}

	fn from_value(&self, value: &Value) -> Result<SystemTime> {
		match value {
			Value::Date(date) => Ok(*date),
			_ => Err(mismatch("date")),
		}
	}
}
