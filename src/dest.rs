//! Destinations for decoded values.
//!
//! Instead of inspecting the type of a destination at runtime, decoded
//! content is first turned into a [`Value`]. Any type that wants to receive
//! values implements [`Destination`], which tells the decoder what
//! [`Kind`] of thing it is and performs the final, range-checked
//! assignment.

use std::fmt;
use crate::decode::ErrorKind;
use crate::ident::Tag;


//------------ Value ---------------------------------------------------------

/// A decoded content value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// An INTEGER value.
    Integer(i64),
}

impl Value {
    /// Returns the tag of the encoded value this was decoded from.
    pub fn tag(self) -> Tag {
        match self {
            Value::Integer(_) => Tag::INTEGER,
        }
    }
}


//------------ Kind ----------------------------------------------------------

/// The kind of a destination.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Int,
    I8,
    I16,
    I32,
    I64,
    Uint,
    U8,
    U16,
    U32,
    U64,
    Bool,
    F32,
    F64,
    String,
    Bytes,
}

impl Kind {
    /// Returns whether the kind is one of the signed integers.
    pub fn is_signed_int(self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Kind::Int => "isize",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Uint => "usize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Bool => "bool",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "String",
            Kind::Bytes => "Vec<u8>",
        })
    }
}


//------------ Destination ---------------------------------------------------

/// A place a decoded value can be stored in.
///
/// Implementations must leave `self` unchanged if they return an error.
pub trait Destination {
    /// Returns the kind of the destination.
    fn kind(&self) -> Kind;

    /// Stores `value` in the destination.
    ///
    /// Returns a type mismatch error if the value cannot be stored in this
    /// kind of destination at all and a value too large error if it doesn’t
    /// fit.
    fn assign(&mut self, value: Value) -> Result<(), ErrorKind>;
}

macro_rules! signed_dest {
    ( $type:ident, $kind:ident ) => {
        impl Destination for $type {
            fn kind(&self) -> Kind {
                Kind::$kind
            }

            fn assign(&mut self, value: Value) -> Result<(), ErrorKind> {
                match value {
                    Value::Integer(int) => {
                        *self = $type::try_from(int).map_err(|_| {
                            xerr!(ErrorKind::ValueTooLarge)
                        })?;
                        Ok(())
                    }
                }
            }
        }
    }
}

signed_dest!(isize, Int);
signed_dest!(i8, I8);
signed_dest!(i16, I16);
signed_dest!(i32, I32);
signed_dest!(i64, I64);

macro_rules! other_dest {
    ( $type:ty, $kind:ident ) => {
        impl Destination for $type {
            fn kind(&self) -> Kind {
                Kind::$kind
            }

            fn assign(&mut self, value: Value) -> Result<(), ErrorKind> {
                xerr!(Err(ErrorKind::TypeMismatch {
                    tag: value.tag(), kind: self.kind()
                }))
            }
        }
    }
}

other_dest!(usize, Uint);
other_dest!(u8, U8);
other_dest!(u16, U16);
other_dest!(u32, U32);
other_dest!(u64, U64);
other_dest!(bool, Bool);
other_dest!(f32, F32);
other_dest!(f64, F64);
other_dest!(String, String);
other_dest!(Vec<u8>, Bytes);


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn narrowing() {
        let mut i = 0i8;
        assert_eq!(i.assign(Value::Integer(-128)), Ok(()));
        assert_eq!(i, -128);
        assert_eq!(
            i.assign(Value::Integer(128)), Err(ErrorKind::ValueTooLarge)
        );
        assert_eq!(i, -128);

        let mut i = 0i32;
        assert_eq!(
            i.assign(Value::Integer(i64::from(i32::MIN) - 1)),
            Err(ErrorKind::ValueTooLarge)
        );
        assert_eq!(i, 0);

        let mut i = 0i64;
        assert_eq!(i.assign(Value::Integer(i64::MIN)), Ok(()));
        assert_eq!(i, i64::MIN);
    }

    #[test]
    fn mismatch() {
        let mut b = false;
        assert_eq!(
            b.assign(Value::Integer(1)),
            Err(ErrorKind::TypeMismatch {
                tag: Tag::INTEGER, kind: Kind::Bool
            })
        );
        assert!(!b);

        let mut u = 7u64;
        assert!(u.assign(Value::Integer(1)).is_err());
        assert_eq!(u, 7);
    }

    #[test]
    fn kinds() {
        assert!(0isize.kind().is_signed_int());
        assert!(0i16.kind().is_signed_int());
        assert!(!0u8.kind().is_signed_int());
        assert!(!String::new().kind().is_signed_int());
        assert_eq!(Vec::<u8>::new().kind().to_string(), "Vec<u8>");
    }
}
