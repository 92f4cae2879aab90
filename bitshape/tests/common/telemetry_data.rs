use std::{
	collections::BTreeMap,
	ops,
	time::{Duration, SystemTime, UNIX_EPOCH},
};

use bitshape::{
	AnyParser, BinaryParser, BranchByKeyParser, DateParser, DynamicParser, EnumFallbackParser,
	NumberParser, ObjectParser, Schema, StringParser, Value,
};
use num_bigint::BigInt;
use rand::Rng;
use rand_pcg::Lcg64Xsh32;

/// 2020-01-01T00:00:00Z
const START_MILLIS: u64 = 1_577_836_800_000;
/// Roughly five years.
const SPAN_MILLIS: u64 = 5 * 365 * 24 * 60 * 60 * 1000;

const SENSOR_KINDS: [&str; 5] = ["humidity", "pressure", "rainfall", "temperature", "wind"];

#[derive(Schema, Clone, Copy, Debug, PartialEq)]
pub enum Severity {
	Notice,
	Info,
	Warning,
	Critical,
}

impl Generate for Severity {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		match rng.gen_range(0..4) {
			0 => Severity::Notice,
			1 => Severity::Info,
			2 => Severity::Warning,
			_ => Severity::Critical,
		}
	}
}

/// Sensor kinds are mostly from a known list, occasionally vendor specific.
pub fn sensor_kind_parser() -> EnumFallbackParser {
	EnumFallbackParser::new(SENSOR_KINDS)
}

/// Station events, discriminated by their `kind` field.
pub fn event_parser() -> BranchByKeyParser<AnyParser> {
	BranchByKeyParser::new("kind", [
		(
			"reboot",
			ObjectParser::new([
				("at", DateParser::new().boxed()),
				("reason", StringParser::new().boxed()),
			]),
		),
		(
			"firmware",
			ObjectParser::new([
				("version", NumberParser::<u32>::new().boxed()),
				("image", BinaryParser::new().boxed()),
			]),
		),
		("heartbeat", ObjectParser::new([("at", DateParser::new().boxed())])),
	])
	.unwrap()
}

#[derive(Schema, Clone, Debug, PartialEq)]
pub struct Reading {
	#[schema(with = "sensor_kind_parser")]
	pub sensor: String,
	#[schema(rename = "takenAt")]
	pub taken_at: SystemTime,
	pub value: f64,
	pub calibrated: Option<bool>,
	pub flagged: bool,
	pub severity: Severity,
}

impl Generate for Reading {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const VENDOR_KINDS: [&str; 2] = ["acme-lux", "soil-moisture-v2"];
		let sensor = if rng.gen_bool(0.9) {
			SENSOR_KINDS[rng.gen_range(0..SENSOR_KINDS.len())]
		} else {
			VENDOR_KINDS[rng.gen_range(0..VENDOR_KINDS.len())]
		};
		Self {
			sensor: sensor.to_string(),
			taken_at: generate_date(rng),
			value: rng.gen(),
			calibrated: <Option<bool> as Generate>::generate(rng),
			flagged: rng.gen_bool(0.1),
			severity: Severity::generate(rng),
		}
	}
}

#[derive(Schema, Clone, Debug, PartialEq)]
pub struct Station {
	pub id: u32,
	#[schema(rename = "serialNumber")]
	pub serial_number: BigInt,
	pub name: Option<String>,
	#[schema(rename = "installedAt")]
	pub installed_at: SystemTime,
	pub location: (f64, f64, i16),
	pub online: bool,
	pub solar: bool,
	pub heated: bool,
	pub tamper_alarm: bool,
	pub maintenance_due: bool,
	pub readings: Vec<Reading>,
	pub counters: BTreeMap<String, u64>,
	#[schema(with = "BinaryParser::new")]
	pub certificate: Vec<u8>,
	#[schema(rename = "lastEvent", with = "event_parser")]
	pub last_event: BTreeMap<String, Value>,
}

impl Generate for Station {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		const NAMES: [&str; 6] = ["ridge", "harbour", "airfield", "orchard", "quarry", "lighthouse"];
		const COUNTERS: [&str; 4] = ["dropped", "retries", "uploads", "watchdog"];
		const MAX_READINGS: usize = 24;

		// Serial numbers do not fit in 64 bits.
		let serial_number = BigInt::from(rng.gen::<u64>()) * BigInt::from(rng.gen::<u64>())
			- BigInt::from(rng.gen::<u32>());

		let mut counters = BTreeMap::new();
		for name in COUNTERS {
			if rng.gen_bool(0.7) {
				counters.insert(name.to_string(), rng.gen_range(0..1_000_000));
			}
		}

		Self {
			id: rng.gen(),
			serial_number,
			name: <Option<()> as Generate>::generate(rng)
				.map(|_| NAMES[rng.gen_range(0..NAMES.len())].to_string()),
			installed_at: generate_date(rng),
			location: <(f64, f64, i16) as Generate>::generate(rng),
			online: rng.gen_bool(0.8),
			solar: rng.gen_bool(0.5),
			heated: rng.gen_bool(0.3),
			tamper_alarm: rng.gen_bool(0.05),
			maintenance_due: rng.gen_bool(0.2),
			readings: generate_vec(rng, 0..MAX_READINGS),
			counters,
			certificate: generate_vec(rng, 16..65),
			last_event: generate_event(rng),
		}
	}
}

fn generate_event<R: Rng>(rng: &mut R) -> BTreeMap<String, Value> {
	const REASONS: [&str; 3] = ["watchdog", "power loss", "scheduled"];
	let fields = match rng.gen_range(0..3) {
		0 => vec![
			("kind", Value::from("reboot")),
			("at", Value::Date(generate_date(rng))),
			("reason", Value::from(REASONS[rng.gen_range(0..REASONS.len())])),
		],
		1 => vec![
			("kind", Value::from("firmware")),
			("version", Value::U32(rng.gen_range(100..400))),
			("image", Value::Binary(generate_vec(rng, 0..32))),
		],
		_ => vec![
			("kind", Value::from("heartbeat")),
			("at", Value::Date(generate_date(rng))),
		],
	};
	fields
		.into_iter()
		.map(|(key, value)| (key.to_string(), value))
		.collect()
}

#[derive(Schema, Clone, Debug, PartialEq)]
pub struct Network {
	pub region: String,
	pub stations: Vec<Station>,
}

pub trait Generate {
	fn generate<R: Rng>(rng: &mut R) -> Self;
}

impl Generate for () {
	fn generate<R: Rng>(_: &mut R) -> Self {}
}

impl Generate for bool {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		rng.gen_bool(0.5)
	}
}

macro_rules! impl_generate {
	($($ty:ty),*) => {
		$(
			impl Generate for $ty {
				fn generate<R: Rng>(rng: &mut R) -> Self {
					rng.gen()
				}
			}
		)*
	};
}

impl_generate!(u8, u32, i16, f64);

macro_rules! impl_tuple {
	($($name:ident),+) => {
		impl<$($name: Generate),+> Generate for ($($name,)+) {
			fn generate<R: Rng>(rng: &mut R) -> Self {
				($($name::generate(rng),)+)
			}
		}
	};
}

impl_tuple!(A, B);
impl_tuple!(A, B, C);

impl<T: Generate> Generate for Option<T> {
	fn generate<R: Rng>(rng: &mut R) -> Self {
		rng.gen_bool(0.5).then(|| T::generate(rng))
	}
}

/// Whole milliseconds, which is the precision dates keep.
fn generate_date<R: Rng>(rng: &mut R) -> SystemTime {
	UNIX_EPOCH + Duration::from_millis(START_MILLIS + rng.gen_range(0..SPAN_MILLIS))
}

fn generate_vec<R: Rng, T: Generate>(rng: &mut R, range: ops::Range<usize>) -> Vec<T> {
	let len = rng.gen_range(range);
	(0..len).map(|_| T::generate(rng)).collect()
}

pub fn generate_data() -> Network {
	const STATE: u64 = 2718281828;
	const STREAM: u64 = 4590452353;
	const STATIONS: usize = 60;

	let mut rng = Lcg64Xsh32::new(STATE, STREAM);
	Network {
		region: "north-coast".to_string(),
		stations: generate_vec(&mut rng, STATIONS..STATIONS + 1),
	}
}
