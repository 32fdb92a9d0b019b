//! Sources of octets to decode from.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{cmp, error, fmt, io, ops};
use std::convert::Infallible;
use bytes::Bytes;
use super::error::{ContentError, DecodeError, ErrorKind};


//------------ Source --------------------------------------------------------

/// A forward-only cursor over the octets of encoded data.
///
/// Octets are accessed by requesting a [`Fragment`] of a certain length.
/// The fragment can be inspected and then either dropped, which leaves the
/// source untouched, or consumed, which advances the source past the
/// fragment. Consumed octets can never be returned to the source.
pub trait Source {
    type Fragment<'f>: Fragment<'f> where Self: 'f;
    type Error: error::Error;


    //--- Required methods

    /// Returns the current logical position of the source.
    fn pos(&self) -> Pos;

    /// Requests a fragment of up to `len` octets.
    ///
    /// The fragment will be shorter than requested only if the source has
    /// reached its end.
    fn request<'f>(
        &'f mut self, len: usize
    ) -> Result<Self::Fragment<'f>, Self::Error>;


    //--- Provided methods

    /// Requests a fragment of exactly `len` octets.
    ///
    /// Returns a truncated error if the source ends before that.
    fn request_exact<'f>(
        &'f mut self, len: usize
    ) -> Result<Self::Fragment<'f>, DecodeError<Self::Error>> {
        let pos = self.pos();
        let frag = self.request(len)?;
        if frag.slice().len() < len {
            xerr!(Err(DecodeError::content(ErrorKind::Truncated, pos)))
        }
        else {
            Ok(frag)
        }
    }

    /// Takes a single octet from the source.
    ///
    /// If there aren’t any more octets available from the source, returns
    /// a truncated error.
    fn take_u8(&mut self) -> Result<u8, DecodeError<Self::Error>> {
        let pos = self.pos();
        let frag = self.request(1)?;
        match frag.slice().first().copied() {
            Some(value) => {
                frag.consume();
                Ok(value)
            }
            None => {
                xerr!(Err(DecodeError::content(ErrorKind::Truncated, pos)))
            }
        }
    }

    /// Takes exactly `len` octets from the source into an owned value.
    fn take_bytes(
        &mut self, len: usize
    ) -> Result<Bytes, DecodeError<Self::Error>> {
        let frag = self.request_exact(len)?;
        let res = Bytes::copy_from_slice(frag.slice());
        frag.consume();
        Ok(res)
    }

    /// Returns a content error at the current position of the source.
    fn content_err(
        &self, err: impl Into<ContentError>
    ) -> DecodeError<Self::Error> {
        DecodeError::content(err.into(), self.pos())
    }
}


//------------ Fragment ------------------------------------------------------

/// A view onto the next octets of a source.
pub trait Fragment<'f> {
    /// Returns the octets of the fragment.
    fn slice(&self) -> &[u8];

    /// Advances the source past the octets of the fragment.
    fn consume(self);
}


//------------ IntoSource ----------------------------------------------------

/// A type that can be converted into a source.
pub trait IntoSource {
    type Source: Source;

    fn into_source(self) -> Self::Source;
}

impl<T: Source> IntoSource for T {
    type Source = Self;

    fn into_source(self) -> Self::Source {
        self
    }
}

impl<'a> IntoSource for &'a [u8] {
    type Source = SliceSource<'a>;

    fn into_source(self) -> Self::Source {
        SliceSource::new(self)
    }
}


//------------ SliceSource ---------------------------------------------------

/// A source atop an immutable octet slice.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'s> {
    data: &'s [u8],
    pos: usize,
}

impl<'s> SliceSource<'s> {
    pub fn new(data: &'s [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the octets not yet consumed.
    pub fn remaining(&self) -> &[u8] {
        self.data
    }
}

impl<'s> Source for SliceSource<'s> {
    type Error = Infallible;
    type Fragment<'f> = SliceFragment<'s, 'f> where Self: 'f;

    fn pos(&self) -> Pos {
        self.pos.into()
    }

    fn request<'f>(
        &'f mut self, len: usize
    ) -> Result<Self::Fragment<'f>, Self::Error> {
        let (head, tail) = match self.data.split_at_checked(len) {
            Some(some) => some,
            None => (self.data, b"".as_ref())
        };
        Ok(SliceFragment { slice: self, head, tail })
    }
}


//------------ SliceFragment -------------------------------------------------

pub struct SliceFragment<'s, 'f> {
    slice: &'f mut SliceSource<'s>,
    head: &'s [u8],
    tail: &'s [u8],
}

impl<'s, 'f> Fragment<'f> for SliceFragment<'s, 'f> {
    fn slice(&self) -> &[u8] {
        self.head
    }

    fn consume(self) {
        self.slice.data = self.tail;
        self.slice.pos += self.head.len();
    }
}


//------------ ReaderSource --------------------------------------------------

/// A source atop a reader.
///
/// Octets are buffered only as far as they have been requested. The end of
/// the reader is treated as the end of the data, so short data results in
/// a truncated error rather than an I/O error.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R> ReaderSource<R> {
    /// The maximum number of octets to read in one go.
    ///
    /// A length taken from the data can be up to 4 GiB. Growing the buffer
    /// step by step makes sure we only allocate what the reader delivers.
    const CHUNK_SIZE: usize = 8 * 1024;

    pub fn new(reader: R) -> Self {
        ReaderSource { reader, buf: Vec::new(), pos: 0 }
    }

    /// Returns the underlying reader.
    ///
    /// Octets that were buffered but not consumed are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> Source for ReaderSource<R> {
    type Fragment<'f> = ReaderFragment<'f> where Self: 'f;
    type Error = io::Error;

    fn pos(&self) -> Pos {
        self.pos.into()
    }

    fn request<'f>(
        &'f mut self, len: usize
    ) -> Result<Self::Fragment<'f>, Self::Error> {
        while self.buf.len() < len {
            let cur_len = self.buf.len();
            let new_len = cmp::min(
                len, cur_len.saturating_add(Self::CHUNK_SIZE)
            );
            self.buf.resize(new_len, 0);
            match self.reader.read(&mut self.buf[cur_len..]) {
                Ok(0) => {
                    self.buf.truncate(cur_len);
                    break
                }
                Ok(read) => self.buf.truncate(cur_len + read),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    self.buf.truncate(cur_len)
                }
                Err(err) => {
                    self.buf.truncate(cur_len);
                    return Err(err)
                }
            }
        }
        let len = cmp::min(len, self.buf.len());
        Ok(ReaderFragment { buf: &mut self.buf, pos: &mut self.pos, len })
    }
}


//------------ ReaderFragment ------------------------------------------------

pub struct ReaderFragment<'f> {
    buf: &'f mut Vec<u8>,
    pos: &'f mut usize,
    len: usize,
}

impl<'f> Fragment<'f> for ReaderFragment<'f> {
    fn slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn consume(self) {
        self.buf.drain(..self.len);
        *self.pos += self.len;
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type can only be used for diagnostics. They can not be used
/// to determine how far a source has been advanced since it was created. This
/// is why we used a newtype.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl ops::Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Pos(self.0 + rhs.0)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slice_source() {
        let mut src = SliceSource::new(b"\x01\x02\x03");
        assert_eq!(src.take_u8().unwrap(), 1);
        assert_eq!(src.pos(), Pos::from(1));

        // Dropping a fragment leaves the source alone.
        assert_eq!(src.request(5).unwrap().slice(), b"\x02\x03");
        assert_eq!(src.remaining(), b"\x02\x03");

        assert_eq!(
            src.request_exact(3).err().and_then(|err| err.kind()),
            Some(ErrorKind::Truncated)
        );
        assert_eq!(src.take_bytes(2).unwrap().as_ref(), b"\x02\x03");
        assert!(src.remaining().is_empty());
        assert_eq!(
            src.take_u8().unwrap_err().kind(), Some(ErrorKind::Truncated)
        );
    }

    /// A reader that hands out at most one octet per read.
    struct Trickle<'a>(&'a [u8]);

    impl<'a> io::Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((first, rest)), Some(target)) => {
                    *target = *first;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0)
            }
        }
    }

    #[test]
    fn reader_source() {
        let mut src = ReaderSource::new(Trickle(b"\x01\x02\x03\x04"));
        assert_eq!(src.take_u8().unwrap(), 1);
        assert_eq!(src.take_bytes(2).unwrap().as_ref(), b"\x02\x03");
        assert_eq!(src.pos(), Pos::from(3));
        assert_eq!(
            src.take_bytes(2).unwrap_err().kind(), Some(ErrorKind::Truncated)
        );
        assert_eq!(src.take_u8().unwrap(), 4);
    }

    #[test]
    fn reader_source_huge_request() {
        let mut src = ReaderSource::new(&b"\x01\x02"[..]);
        assert_eq!(
            src.request_exact(usize::MAX).err().and_then(|err| err.kind()),
            Some(ErrorKind::Truncated)
        );
    }
}
