//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is re-exported
//! by the parent.

use crate::decode::{DecodeError, ErrorKind, Fragment, Source};


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// Only definite lengths are supported, so a length is simply the number
/// of content octets that follow.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the definite length. Thus, if the first octet is
/// less than 128, it provides the definite length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. If they specify that there are zero more octets, i.e., the
/// value of the first octet is 128, the length is indefinite. Otherwise,
/// those following octets give the big-endian encoding of the definite
/// length of the content octets.
///
/// We accept at most four of those following octets, so lengths are
/// limited to what fits into a `u32`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Length(u32);

impl Length {
    /// The first octet value signalling an indefinite length.
    const INDEFINITE: u8 = 0x80;

    /// The maximum number of octets following a long form first octet.
    const MAX_OCTETS: usize = 4;

    /// Returns the number of content octets.
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Parses a length from the beginning of a source.
    pub fn take_from<S: Source>(
        source: &mut S
    ) -> Result<Self, DecodeError<S::Error>> {
        let res = match source.take_u8()? {
            Self::INDEFINITE => {
                xerr!(return Err(
                    source.content_err(ErrorKind::UnsupportedEncoding)
                ))
            }

            // Bit 7 clear: short form.
            first if first & 0x80 == 0 => Length(u32::from(first)),

            // Anything else: clear left bit, number of octets.
            first => {
                let count = usize::from(first & 0x7f);
                if count > Self::MAX_OCTETS {
                    xerr!(return Err(
                        source.content_err(ErrorKind::MalformedLength)
                    ))
                }

                // Right-justify the octets into a big-endian u32.
                let mut res = [0u8; Self::MAX_OCTETS];
                let frag = source.request_exact(count)?;
                res[Self::MAX_OCTETS - count..].copy_from_slice(
                    frag.slice()
                );
                frag.consume();
                Length(u32::from_be_bytes(res))
            }
        };
        log::trace!("length {}", res.0);
        Ok(res)
    }
}

impl From<Length> for usize {
    fn from(length: Length) -> usize {
        length.to_usize()
    }
}


//============ Tests =========================================================
