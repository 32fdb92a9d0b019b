//! Reading a single encoded value.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use bytes::Bytes;
use crate::ident::{Class, Ident, Tag};
use crate::length::Length;
use super::error::DecodeError;
use super::source::{IntoSource, Source};


//------------ Element -------------------------------------------------------

/// A single encoded value.
///
/// This is the result of reading the identifier octet, the length octets,
/// and exactly as many content octets as the length says. The content is
/// never looked into, even if the value is constructed; nested values are
/// handed on as they are.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    class: Class,
    tag: Tag,
    primitive: bool,
    content: Bytes,
}

impl Element {
    /// Takes a single element from the beginning of a source.
    ///
    /// Consumes the identifier, length, and content octets. Octets after the
    /// element are left in the source. On error, the source will have been
    /// advanced by an unspecified amount.
    pub fn take_from<S: Source>(
        source: &mut S
    ) -> Result<Self, DecodeError<S::Error>> {
        let ident = Ident::take_from(source)?;
        let length = Length::take_from(source)?;
        let content = source.take_bytes(length.to_usize())?;
        let res = Element {
            class: ident.class(),
            tag: ident.tag(),
            primitive: ident.is_primitive(),
            content,
        };
        log::trace!(
            "element {} {} with {} content octets",
            res.class, res.tag, res.content.len()
        );
        Ok(res)
    }

    /// Decodes a single element from the beginning of something.
    pub fn decode<I: IntoSource>(
        source: I
    ) -> Result<Self, DecodeError<<I::Source as Source>::Error>> {
        Self::take_from(&mut source.into_source())
    }

    /// Returns the class of the element’s tag.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the tag of the element.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns whether the element is primitive.
    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    /// Returns whether the element is constructed.
    pub fn is_constructed(&self) -> bool {
        !self.primitive
    }

    /// Returns the content octets.
    pub fn content(&self) -> &[u8] {
        self.content.as_ref()
    }

    /// Converts the element into its content octets.
    pub fn into_content(self) -> Bytes {
        self.content
    }
}


//============ Tests =========================================================
