//! BER encoded integers.

use bytes::Bytes;
use crate::decode::{ContentDecoder, ContentError, Element, ErrorKind};
use crate::dest::{Kind, Value};


//------------ Integer -------------------------------------------------------

/// A BER encoded integer.
///
/// As integers are variable length in BER, this type is just a simple wrapper
/// atop the underlying `Bytes` value containing the raw content. The value
/// can be converted into an `i64` if it has no more than eight octets.
///
/// # BER Encoding
///
/// In BER, an INTEGER is encoded as a primitive value with the content octets
/// providing a variable-length, big-endian, two‘s complement byte sequence of
/// that integer. Thus, the most-significant bit of the first octet serves as
/// the sign bit.
///
/// We don’t insist on the shortest encoding. A leading zero octet is what
/// makes a value positive whose second octet has the left-most bit set, but
/// more zeros than that are accepted, too.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// The maximum number of content octets that fit into an `i64`.
    pub const MAX_I64_LEN: usize = 8;

    /// Creates an integer from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        Integer(content)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the integer into an `i64`.
    pub fn to_i64(&self) -> Result<i64, ContentError> {
        Self::i64_from_content(self.as_slice())
    }

    /// Interprets content octets as a two’s complement `i64`.
    ///
    /// Empty content is zero. Returns a value too large error if there are
    /// more than eight octets.
    pub fn i64_from_content(content: &[u8]) -> Result<i64, ContentError> {
        if content.len() > Self::MAX_I64_LEN {
            xerr!(return Err(ErrorKind::ValueTooLarge.into()))
        }

        // The sign bit is worth minus its positional value, so we subtract
        // it and add the remaining seven bits of the first octet as usual.
        // For eight octets, `0x80 << 56` is `i64::MIN` and the intermediate
        // results wrap, but the final sum is always in range.
        let mut res = 0i64;
        for (i, &octet) in content.iter().enumerate() {
            let shift = (content.len() - i - 1) * 8;
            let mut octet = octet;
            if i == 0 && octet & 0x80 != 0 {
                res = res.wrapping_sub(0x80 << shift);
                octet &= 0x7f;
            }
            res = res.wrapping_add(i64::from(octet) << shift);
        }
        Ok(res)
    }
}

impl AsRef<[u8]> for Integer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//------------ IntegerDecoder ------------------------------------------------

/// The content decoder for INTEGER values.
///
/// Decodes into [`Value::Integer`] and only accepts signed integer
/// destinations.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerDecoder;

impl ContentDecoder for IntegerDecoder {
    fn accepts(&self, kind: Kind) -> bool {
        kind.is_signed_int()
    }

    fn decode_content(
        &self, element: &Element
    ) -> Result<Value, ContentError> {
        Integer::i64_from_content(element.content()).map(Value::Integer)
    }
}


//============ Tests =========================================================
