//! The identifier octet of a BER encoded value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::fmt;
use crate::decode::{DecodeError, Source};


//------------ Tag -----------------------------------------------------------

/// The tag number of a value.
///
/// In ASN.1, tags are used to identify the type of a value. In BER, the
/// number of the tag lives in the lower five bits of the identifier octet.
/// Together with the [`Class`], it tells what kind of value follows.
///
/// # Limitations
///
/// The number `0x1f` signals that the actual tag number follows in
/// additional octets. This is not supported. Such values carry the tag
/// [`Tag::USE_LONG_FORM`] and no content decoder is available for it.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Tag(u8);

impl Tag {
    /// The mask for the tag number bits of the identifier octet.
    const NUMBER_MASK: u8 = 0x1f;

    /// Creates a tag from the lower five bits of `number`.
    pub const fn new(number: u8) -> Self {
        Tag(number & Self::NUMBER_MASK)
    }

    /// Returns the tag number.
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690.
///
impl Tag {
    /// The tag of the end-of-contents marker, UNIVERSAL 0.
    pub const EOC: Self = Tag(0x00);

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Tag(0x01);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Tag(0x02);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Tag(0x03);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Tag(0x04);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Tag(0x05);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Tag(0x06);

    /// The tag for the ObjectDescriptor type, UNIVERSAL 7.
    pub const OBJECT_DESCRIPTOR: Self = Tag(0x07);

    /// The tag for the EXTERNAL and Instance-of types, UNIVERSAL 8.
    pub const EXTERNAL: Self = Tag(0x08);

    /// The tag for the REAL type, UNIVERSAL 9.
    pub const REAL: Self = Tag(0x09);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Tag(0x0a);

    /// The tag for the EMBEDDED PDV type, UNIVERSAL 11.
    pub const EMBEDDED_PDV: Self = Tag(0x0b);

    /// The tag for the UTF8String type, UNIVERSAL 12
    pub const UTF8_STRING: Self = Tag(0x0c);

    /// The tag for the RELATIVE-OID type, UNIVERSAL 13.
    pub const RELATIVE_OID: Self = Tag(0x0d);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Tag(0x10);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Tag(0x11);

    /// The tag for the NumericString type, UNIVERSAL 18.
    pub const NUMERIC_STRING: Self = Tag(0x12);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Tag(0x13);

    /// The tag for the TeletexString (T61String) type, UNIVERSAL 20.
    pub const TELETEX_STRING: Self = Tag(0x14);

    /// The tag for the VideotexString type, UNIVERSAL 21.
    pub const VIDEOTEX_STRING: Self = Tag(0x15);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Tag(0x16);

    /// The tag for the UTCTime type, UNIVERSAL 23.
    pub const UTC_TIME: Self = Tag(0x17);

    /// The tag for the GeneralizedTime type, UNIVERSAL 24.
    pub const GENERALIZED_TIME: Self = Tag(0x18);

    /// The tag for the GraphicString type, UNIVERSAL 25.
    pub const GRAPHIC_STRING: Self = Tag(0x19);

    /// The tag for the VisibleString type, UNIVERSAL 26.
    pub const VISIBLE_STRING: Self = Tag(0x1a);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Tag(0x1b);

    /// The tag for the UniversalString type, UNIVERSAL 28.
    pub const UNIVERSAL_STRING: Self = Tag(0x1c);

    /// The tag for the CHARACTER STRING type, UNIVERSAL 29.
    pub const CHARACTER_STRING: Self = Tag(0x1d);

    /// The tag for the BMPString type, UNIVERSAL 30.
    pub const BMP_STRING: Self = Tag(0x1e);

    /// The tag number continues in the following octets.
    pub const USE_LONG_FORM: Self = Tag(0x1f);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::EOC => write!(f, "EOC"),
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::OBJECT_DESCRIPTOR => write!(f, "ObjectDescriptor"),
            Tag::EXTERNAL => write!(f, "EXTERNAL"),
            Tag::REAL => write!(f, "REAL"),
            Tag::ENUMERATED => write!(f, "ENUMERATED"),
            Tag::EMBEDDED_PDV => write!(f, "EMBEDDED PDV"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::RELATIVE_OID => write!(f, "RELATIVE-OID"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            Tag::NUMERIC_STRING => write!(f, "NumericString"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::TELETEX_STRING => write!(f, "TeletexString"),
            Tag::VIDEOTEX_STRING => write!(f, "VideotexString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::GRAPHIC_STRING => write!(f, "GraphicString"),
            Tag::VISIBLE_STRING => write!(f, "VisibleString"),
            Tag::GENERAL_STRING => write!(f, "GeneralString"),
            Tag::UNIVERSAL_STRING => write!(f, "UniversalString"),
            Tag::CHARACTER_STRING => write!(f, "CHARACTER STRING"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            Tag::USE_LONG_FORM => write!(f, "long form tag"),
            Tag(number) => write!(f, "Tag({})", number),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#04x})", self.0)
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    /// The mask for the class bits of the identifier octet.
    const MASK: u8 = 0xc0;

    const fn from_u8(octet: u8) -> Self {
        match octet & Self::MASK {
            0x00 => Self::Universal,
            0x40 => Self::Application,
            0x80 => Self::Context,
            _ => Self::Private
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::Context => "CONTEXT-SPECIFIC",
            Class::Private => "PRIVATE",
        })
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octet of an encoded value.
///
/// The octet combines three things: the [`Class`] in bits 7 and 6, whether
/// the value is constructed in bit 5, and the [`Tag`] number in bits 4 to 0.
/// Every octet is a valid identifier.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Ident(u8);

impl Ident {
    /// The mask for checking whether the value is constructed.
    ///
    /// A value of 0 indicates primitive.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// Creates the identifier from its octet.
    pub const fn from_u8(octet: u8) -> Self {
        Ident(octet)
    }

    /// Returns the identifier octet.
    pub const fn into_u8(self) -> u8 {
        self.0
    }

    /// Returns the class of the identifier.
    pub const fn class(self) -> Class {
        Class::from_u8(self.0)
    }

    /// Returns the tag of the identifier.
    pub const fn tag(self) -> Tag {
        Tag::new(self.0)
    }

    /// Returns whether the value is primitive.
    pub const fn is_primitive(self) -> bool {
        self.0 & Self::CONSTRUCTED_MASK == 0
    }

    /// Returns whether the value is constructed.
    pub const fn is_constructed(self) -> bool {
        !self.is_primitive()
    }

    /// Takes the identifier octet from the beginning of a source.
    pub fn take_from<S: Source>(
        source: &mut S
    ) -> Result<Self, DecodeError<S::Error>> {
        let res = Ident(source.take_u8()?);
        log::trace!(
            "identifier {:?}: {} {}, {}",
            res, res.class(), res.tag(),
            if res.is_primitive() { "primitive" } else { "constructed" }
        );
        Ok(res)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ident({:#04x})", self.0)
    }
}


//============ Tests =========================================================
