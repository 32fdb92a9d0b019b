//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt};
use std::convert::Infallible;
use crate::dest::Kind;
use crate::ident::Tag;
use super::source::Pos;


//------------ ErrorKind -----------------------------------------------------

/// The reason decoding a value failed.
///
/// All errors are terminal for a decode call. Nothing is retried and the
/// destination is left untouched.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// There was no destination to decode into.
    InvalidDestination,

    /// The decoded tag cannot be stored in the kind of destination given.
    TypeMismatch {
        /// The tag of the decoded value.
        tag: Tag,

        /// The kind of the destination.
        kind: Kind,
    },

    /// There is no content decoder for the tag.
    UnsupportedTag(Tag),

    /// The value uses the indefinite length form.
    UnsupportedEncoding,

    /// The long form length has more than four length octets.
    MalformedLength,

    /// The value does not fit into the destination.
    ValueTooLarge,

    /// The data ended before the value was complete.
    Truncated,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::InvalidDestination => {
                f.write_str("value must be a non-null reference")
            }
            ErrorKind::TypeMismatch { tag, kind } => {
                write!(f, "incompatible types {} and {}", tag, kind)
            }
            ErrorKind::UnsupportedTag(tag) => {
                write!(f, "unsupported tag: {}", tag)
            }
            ErrorKind::UnsupportedEncoding => {
                f.write_str("indefinite length encodings not supported")
            }
            ErrorKind::MalformedLength => {
                f.write_str("length octets: long form longer than 4 octets")
            }
            ErrorKind::ValueTooLarge => {
                f.write_str("value does not fit into destination")
            }
            ErrorKind::Truncated => {
                f.write_str("unexpected end of data")
            }
        }
    }
}


//------------ ContentError --------------------------------------------------

/// An error happened while interpreting the octets of a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContentError {
    kind: ErrorKind,
}

impl ContentError {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for ContentError {
    fn from(kind: ErrorKind) -> Self {
        ContentError { kind }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl error::Error for ContentError { }


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// This can either be a content error, i.e., the data did not follow the
/// encoding rules or could not be stored, or an error of the source the data
/// was read from. The type of the latter is given via the type argument. For
/// sources that cannot fail, this is `Infallible`.
#[derive(Debug)]
pub struct DecodeError<S = Infallible> {
    inner: DecodeErrorKind<S>,
}

#[derive(Debug)]
enum DecodeErrorKind<S> {
    Source(S),
    Content {
        error: ContentError,
        pos: Pos,
    }
}

impl<S> DecodeError<S> {
    /// Creates a content error at the given position.
    pub fn content(error: impl Into<ContentError>, pos: Pos) -> Self {
        DecodeError {
            inner: DecodeErrorKind::Content { error: error.into(), pos }
        }
    }

    /// Returns the kind of a content error.
    ///
    /// Returns `None` if this is an error of the source.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self.inner {
            DecodeErrorKind::Source(_) => None,
            DecodeErrorKind::Content { ref error, .. } => Some(error.kind()),
        }
    }

    /// Returns the position of a content error.
    pub fn pos(&self) -> Option<Pos> {
        match self.inner {
            DecodeErrorKind::Source(_) => None,
            DecodeErrorKind::Content { pos, .. } => Some(pos),
        }
    }

    /// Returns a reference to the source error if this is one.
    pub fn source_error(&self) -> Option<&S> {
        match self.inner {
            DecodeErrorKind::Source(ref err) => Some(err),
            DecodeErrorKind::Content { .. } => None,
        }
    }
}

impl<S> From<S> for DecodeError<S> {
    fn from(err: S) -> Self {
        DecodeError { inner: DecodeErrorKind::Source(err) }
    }
}

impl<S: fmt::Display> fmt::Display for DecodeError<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            DecodeErrorKind::Source(ref err) => err.fmt(f),
            DecodeErrorKind::Content { ref error, pos } => {
                write!(f, "{} (at position {})", error, pos)
            }
        }
    }
}

impl<S: error::Error> error::Error for DecodeError<S> { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            ErrorKind::TypeMismatch {
                tag: Tag::INTEGER, kind: Kind::Bool
            }.to_string(),
            "incompatible types INTEGER and bool"
        );
        assert_eq!(
            ErrorKind::UnsupportedTag(Tag::OCTET_STRING).to_string(),
            "unsupported tag: OCTET STRING"
        );
        assert_eq!(
            DecodeError::<Infallible>::content(
                ErrorKind::Truncated, Pos::from(3)
            ).to_string(),
            "unexpected end of data (at position 3)"
        );
    }

    #[test]
    fn kind_and_pos() {
        let err = DecodeError::<Infallible>::content(
            ErrorKind::MalformedLength, Pos::from(1)
        );
        assert_eq!(err.kind(), Some(ErrorKind::MalformedLength));
        assert_eq!(err.pos(), Some(Pos::from(1)));
        assert!(err.source_error().is_none());

        let err = DecodeError::from(
            std::io::Error::new(std::io::ErrorKind::Other, "boom")
        );
        assert_eq!(err.kind(), None);
        assert!(err.source_error().is_some());
    }
}
