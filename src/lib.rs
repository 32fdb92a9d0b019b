//! Decoding single values in Basic Encoding Rules.
//!
//! This crate reads exactly one BER encoded value, i.e., its identifier
//! octet, its length octets, and its content, and stores the content in a
//! native Rust value. Only INTEGER is supported out of the box, decoding
//! into any of the signed integer types:
//!
//! ```
//! let mut value = 0i32;
//! berdec::unmarshal(b"\x02\x02\x01\x00", &mut value).unwrap();
//! assert_eq!(value, 256);
//! ```
//!
//! Support for other tags can be added by registering a
//! [`ContentDecoder`][decode::ContentDecoder] with a
//! [`Registry`][decode::Registry].
//!
//! Encoding, indefinite length values, and tag numbers that don’t fit into
//! the identifier octet are not supported.

pub use self::decode::{
    DecodeError, ErrorKind, unmarshal, unmarshal_opt, unmarshal_reader
};
pub use self::dest::{Destination, Kind, Value};
pub use self::ident::{Class, Ident, Tag};
pub use self::int::{Integer, IntegerDecoder};
pub use self::length::Length;

#[macro_use] pub mod debug;

pub mod decode;
pub mod dest;
pub mod int;

mod ident;
mod length;
