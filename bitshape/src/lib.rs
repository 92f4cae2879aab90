//! Schema-driven binary serialization.
//!
//! A schema is a tree of [`Parser`]s. Encoding a value walks the tree once,
//! writing flag-like data to a densely packed bit field and everything else to
//! a byte body. Both are framed into a container tagged with the schema's
//! identity, so a payload can only be decoded with a schema of the same shape.
//!
//! ```
//! use bitshape::{EncodeOptions, Parser, Schema};
//!
//! #[derive(Schema, Debug, PartialEq)]
//! struct User {
//! 	id: u32,
//! 	name: String,
//! 	active: bool,
//! }
//!
//! let parser = User::parser();
//! let user = User { id: 7, name: "ok".to_string(), active: true };
//! let encoded = parser.encode(&user, &EncodeOptions::new().with_base64(true)).unwrap();
//! assert_eq!(parser.decode(&encoded).unwrap(), user);
//! ```

#[cfg(feature = "derive")]
pub use bitshape_derive::Schema;

mod error;
pub use error::{Error, Result};

mod parser;
pub use parser::{EncodeOptions, Encoded, Parser, Payload};

mod context;
pub use context::{DecodeContext, EncodeContext, FLAG_BIT_FIELD_COMPRESSED, FLAG_BODY_COMPRESSED};

mod parsers;
pub use parsers::{
	ArrayParser, BigIntParser, BinaryParser, BooleanParser, BranchByKeyParser, BranchParser,
	DateParser, EnumFallbackParser, EnumParser, EnumValue, MapParser, ModifyHashParser,
	NullableParser, Number, NumberParser, ObjectParser, StringParser, TupleElements, TupleParser,
};

mod schema;
pub use schema::{Record, RecordParser, Schema};

mod value;
pub use value::{AnyParser, DynamicParser, TagField, Value};

mod compress;
pub mod io;
mod transport;
pub mod util;
