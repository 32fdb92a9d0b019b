//! Decoding a single BER encoded value.
//!
//! Decoding happens in two steps. First, an [`Element`] is taken from a
//! [`Source`]: its identifier and length octets are interpreted and the
//! content octets are collected. Then the [`Registry`] picks a
//! [`ContentDecoder`] by the element’s tag that turns the content into a
//! value for the destination.

pub use self::element::Element;
pub use self::error::{ContentError, DecodeError, ErrorKind};
pub use self::registry::{
    ContentDecoder, Registry, unmarshal, unmarshal_opt, unmarshal_reader
};
pub use self::source::{
    Fragment, IntoSource, Pos, ReaderFragment, ReaderSource, SliceFragment,
    SliceSource, Source
};

mod element;
mod error;
mod registry;
mod source;
