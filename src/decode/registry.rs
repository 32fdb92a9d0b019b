//! Dispatching elements to content decoders.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{fmt, io};
use smallvec::SmallVec;
use crate::dest::{Destination, Kind, Value};
use crate::ident::Tag;
use crate::int::IntegerDecoder;
use super::element::Element;
use super::error::{ContentError, DecodeError, ErrorKind};
use super::source::{IntoSource, ReaderSource, Source};


//------------ ContentDecoder ------------------------------------------------

/// A type that knows how to interpret the content of elements of a tag.
pub trait ContentDecoder {
    /// Returns whether values of this decoder can go into `kind`.
    fn accepts(&self, kind: Kind) -> bool;

    /// Decodes the content octets of `element`.
    fn decode_content(
        &self, element: &Element
    ) -> Result<Value, ContentError>;
}


//------------ Registry ------------------------------------------------------

/// The content decoders available for decoding, keyed by tag.
///
/// Decoders are picked by the tag number alone. The class of the element
/// is not considered.
pub struct Registry {
    decoders: SmallVec<[(Tag, BoxedDecoder); 4]>,
}

type BoxedDecoder = Box<dyn ContentDecoder + Send + Sync>;

impl Registry {
    /// Creates a registry without any decoders.
    pub fn new() -> Self {
        Registry { decoders: SmallVec::new() }
    }

    /// Creates a registry with all the decoders this crate provides.
    ///
    /// Currently, this is only INTEGER.
    pub fn ber() -> Self {
        let mut res = Self::new();
        res.register(Tag::INTEGER, IntegerDecoder);
        res
    }

    /// Registers `decoder` for `tag`.
    ///
    /// A decoder previously registered for the tag is replaced.
    pub fn register(
        &mut self,
        tag: Tag,
        decoder: impl ContentDecoder + Send + Sync + 'static
    ) -> &mut Self {
        let decoder: BoxedDecoder = Box::new(decoder);
        match self.decoders.iter_mut().find(|item| item.0 == tag) {
            Some(item) => item.1 = decoder,
            None => self.decoders.push((tag, decoder)),
        }
        self
    }

    /// Returns the decoder for `tag` if there is one.
    pub fn get(
        &self, tag: Tag
    ) -> Option<&(dyn ContentDecoder + Send + Sync)> {
        self.decoders.iter().find_map(|item| {
            (item.0 == tag).then(|| &*item.1)
        })
    }

    /// Decodes a single element from `source` into `dest`.
    ///
    /// Reads exactly one element. Whatever follows it in the source is left
    /// alone. If `dest` is `None`, fails without reading anything. The
    /// destination is only changed if decoding succeeds.
    pub fn unmarshal_from<I, D>(
        &self, source: I, dest: Option<&mut D>
    ) -> Result<(), DecodeError<<I::Source as Source>::Error>>
    where I: IntoSource, D: Destination + ?Sized {
        let mut source = source.into_source();
        let dest = match dest {
            Some(dest) => dest,
            None => {
                xerr!(return Err(
                    source.content_err(ErrorKind::InvalidDestination)
                ))
            }
        };

        let start = source.pos();
        let element = Element::take_from(&mut source)?;
        let tag = element.tag();
        let decoder = match self.get(tag) {
            Some(decoder) => decoder,
            None => {
                log::debug!("no content decoder for tag {}", tag);
                xerr!(return Err(DecodeError::content(
                    ErrorKind::UnsupportedTag(tag), start
                )))
            }
        };
        if !decoder.accepts(dest.kind()) {
            log::debug!("cannot decode {} into {}", tag, dest.kind());
            xerr!(return Err(DecodeError::content(
                ErrorKind::TypeMismatch { tag, kind: dest.kind() }, start
            )))
        }
        let value = decoder.decode_content(&element).map_err(|err| {
            DecodeError::content(err, start)
        })?;
        dest.assign(value).map_err(|err| DecodeError::content(err, start))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::ber()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(
            self.decoders.iter().map(|item| item.0)
        ).finish()
    }
}


//------------ Entry points --------------------------------------------------

/// Decodes a single BER encoded value from `data` into `dest`.
///
/// Only INTEGER values are supported and `dest` must be a signed integer
/// wide enough for the value. Octets following the value are ignored.
///
/// ```
/// let mut i = 0i64;
/// berdec::unmarshal(b"\x02\x01\xfc", &mut i).unwrap();
/// assert_eq!(i, -4);
/// ```
pub fn unmarshal<D: Destination + ?Sized>(
    data: &[u8], dest: &mut D
) -> Result<(), DecodeError> {
    Registry::ber().unmarshal_from(data, Some(dest))
}

/// Decodes a single value into an optional destination.
///
/// This fails with an invalid destination error if `dest` is `None`.
pub fn unmarshal_opt(
    data: &[u8], dest: Option<&mut dyn Destination>
) -> Result<(), DecodeError> {
    Registry::ber().unmarshal_from(data, dest)
}

/// Decodes a single value read from `reader` into `dest`.
///
/// Only the octets of the value are taken from the reader, though more may
/// have been read into an internal buffer and are lost.
pub fn unmarshal_reader<R: io::Read, D: Destination + ?Sized>(
    reader: R, dest: &mut D
) -> Result<(), DecodeError<io::Error>> {
    Registry::ber().unmarshal_from(ReaderSource::new(reader), Some(dest))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn kind<D: Destination + ?Sized>(
        data: &[u8], dest: &mut D
    ) -> Option<ErrorKind> {
        unmarshal(data, dest).unwrap_err().kind()
    }

    #[test]
    fn decode_integers() {
        let mut i = 0i64;
        unmarshal(b"\x02\x01\x05", &mut i).unwrap();
        assert_eq!(i, 5);

        unmarshal(b"\x02\x01\xfc", &mut i).unwrap();
        assert_eq!(i, -4);

        unmarshal(
            b"\x02\x08\x00\xff\xff\xff\xff\xff\xff\xff", &mut i
        ).unwrap();
        assert_eq!(i, 72057594037927935);

        let mut i = 0isize;
        unmarshal(b"\x02\x02\xff\x7f", &mut i).unwrap();
        assert_eq!(i, -129);
    }

    #[test]
    fn narrow_destinations() {
        let mut i = 0i8;
        unmarshal(b"\x02\x01\x80", &mut i).unwrap();
        assert_eq!(i, -128);
        assert_eq!(
            kind(b"\x02\x02\x00\x80", &mut i),
            Some(ErrorKind::ValueTooLarge)
        );
        assert_eq!(i, -128);

        let mut i = 0i16;
        unmarshal(b"\x02\x02\x80\xff", &mut i).unwrap();
        assert_eq!(i, -32513);

        let mut i = 0i32;
        assert_eq!(
            kind(b"\x02\x05\x01\x00\x00\x00\x00", &mut i),
            Some(ErrorKind::ValueTooLarge)
        );
        assert_eq!(i, 0);
    }

    #[test]
    fn empty_input() {
        let mut i = 0i64;
        assert_eq!(kind(b"", &mut i), Some(ErrorKind::Truncated));
    }

    #[test]
    fn invalid_destination() {
        let err = unmarshal_opt(b"", None).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidDestination));

        let err = unmarshal_opt(b"\x02\x01\x05", None).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidDestination));

        let mut i = 0i64;
        unmarshal_opt(b"\x02\x01\x05", Some(&mut i)).unwrap();
        assert_eq!(i, 5);
    }

    #[test]
    fn indefinite_length() {
        let mut i = 0i64;
        for tag in [0x02, 0x04, 0x30, 0xa0] {
            assert_eq!(
                kind(&[tag, 0x80], &mut i),
                Some(ErrorKind::UnsupportedEncoding)
            );
        }
    }

    #[test]
    fn too_many_content_octets() {
        let mut i = 7i64;
        assert_eq!(
            kind(b"\x02\x09\x00\x00\x00\x00\x00\x00\x00\x00\x00", &mut i),
            Some(ErrorKind::ValueTooLarge)
        );
        assert_eq!(i, 7);
    }

    #[test]
    fn malformed_length() {
        let mut i = 0i64;
        assert_eq!(
            kind(b"\x02\x85\x00\x00\x00\x00\x01\x05", &mut i),
            Some(ErrorKind::MalformedLength)
        );
    }

    #[test]
    fn unsupported_tags() {
        let mut i = 0i64;
        assert_eq!(
            kind(b"\x04\x01\x05", &mut i),
            Some(ErrorKind::UnsupportedTag(Tag::OCTET_STRING))
        );
        assert_eq!(
            kind(b"\x1f\x01\x05", &mut i),
            Some(ErrorKind::UnsupportedTag(Tag::USE_LONG_FORM))
        );
        assert_eq!(i, 0);
    }

    #[test]
    fn type_mismatch() {
        let mut b = false;
        assert_eq!(
            kind(b"\x02\x01\x01", &mut b),
            Some(ErrorKind::TypeMismatch {
                tag: Tag::INTEGER, kind: Kind::Bool
            })
        );

        // The kind is checked before the content.
        let mut s = String::new();
        assert_eq!(
            kind(b"\x02\x09\x00\x00\x00\x00\x00\x00\x00\x00\x00", &mut s),
            Some(ErrorKind::TypeMismatch {
                tag: Tag::INTEGER, kind: Kind::String
            })
        );

        let mut u = 0u32;
        assert!(kind(b"\x02\x01\x01", &mut u).is_some());
        assert_eq!(u, 0);
    }

    #[test]
    fn trailing_data_is_ignored() {
        let mut i = 0i64;
        unmarshal(b"\x02\x01\x05\xff\xff", &mut i).unwrap();
        assert_eq!(i, 5);
    }

    #[test]
    fn idempotent() {
        let data = b"\x02\x03\xfe\xdc\xba";
        let (mut first, mut second) = (0i64, 0i64);
        unmarshal(data, &mut first).unwrap();
        unmarshal(data, &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, -0x012346);
    }

    #[test]
    fn reader() {
        let mut i = 0i32;
        unmarshal_reader(&b"\x02\x02\x01\x00"[..], &mut i).unwrap();
        assert_eq!(i, 256);

        let err = unmarshal_reader(&b"\x02\x02\x01"[..], &mut i).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Truncated));
        assert_eq!(i, 256);
    }

    struct Failing;

    impl io::Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    #[test]
    fn reader_error() {
        let mut i = 0i64;
        let err = unmarshal_reader(Failing, &mut i).unwrap_err();
        assert_eq!(err.kind(), None);
        assert_eq!(
            err.source_error().map(|err| err.kind()),
            Some(io::ErrorKind::Other)
        );
    }

    /// Decodes BOOLEAN content for testing registration.
    struct BoolAsInt;

    impl ContentDecoder for BoolAsInt {
        fn accepts(&self, kind: Kind) -> bool {
            kind.is_signed_int()
        }

        fn decode_content(
            &self, element: &Element
        ) -> Result<Value, ContentError> {
            match element.content() {
                [0] => Ok(Value::Integer(0)),
                [_] => Ok(Value::Integer(1)),
                _ => Err(ErrorKind::ValueTooLarge.into()),
            }
        }
    }

    #[test]
    fn registry() {
        let mut registry = Registry::new();
        let mut i = 0i64;
        assert_eq!(
            registry.unmarshal_from(
                &b"\x02\x01\x05"[..], Some(&mut i)
            ).unwrap_err().kind(),
            Some(ErrorKind::UnsupportedTag(Tag::INTEGER))
        );

        registry.register(Tag::BOOLEAN, BoolAsInt);
        registry.unmarshal_from(&b"\x01\x01\xff"[..], Some(&mut i)).unwrap();
        assert_eq!(i, 1);

        assert!(Registry::default().get(Tag::INTEGER).is_some());
        assert!(Registry::default().get(Tag::BOOLEAN).is_none());
        assert_eq!(format!("{:?}", Registry::ber()), "{Tag(0x02)}");
    }

    #[test]
    fn register_replaces() {
        let mut registry = Registry::ber();
        registry.register(Tag::INTEGER, BoolAsInt);
        let mut i = 0i64;
        registry.unmarshal_from(&b"\x02\x01\x05"[..], Some(&mut i)).unwrap();
        assert_eq!(i, 1);
    }
}
