use std::fmt;
use std::str::FromStr;

use bytes::{Buf, BufMut};

use crate::endian::Endian;
use crate::error::{ArrayError, Result};

/// Runtime tag for an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl TypeCode {
    pub const ALL: [TypeCode; 10] = [
        TypeCode::U8,
        TypeCode::I8,
        TypeCode::U16,
        TypeCode::I16,
        TypeCode::U32,
        TypeCode::I32,
        TypeCode::U64,
        TypeCode::I64,
        TypeCode::F32,
        TypeCode::F64,
    ];

    /// Size of one element in bytes.
    pub const fn width(self) -> usize {
        match self {
            TypeCode::U8 | TypeCode::I8 => 1,
            TypeCode::U16 | TypeCode::I16 => 2,
            TypeCode::U32 | TypeCode::I32 | TypeCode::F32 => 4,
            TypeCode::U64 | TypeCode::I64 | TypeCode::F64 => 8,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, TypeCode::F32 | TypeCode::F64)
    }

    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            TypeCode::U8 | TypeCode::U16 | TypeCode::U32 | TypeCode::U64
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            TypeCode::U8 => "u8",
            TypeCode::I8 => "i8",
            TypeCode::U16 => "u16",
            TypeCode::I16 => "i16",
            TypeCode::U32 => "u32",
            TypeCode::I32 => "i32",
            TypeCode::U64 => "u64",
            TypeCode::I64 => "i64",
            TypeCode::F32 => "f32",
            TypeCode::F64 => "f64",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts Rust-style names (`u32`) and the classic one-letter codes
/// (`B b H h I i Q q f d`).
impl FromStr for TypeCode {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self> {
        let code = match s.trim() {
            "u8" | "B" => TypeCode::U8,
            "i8" | "b" => TypeCode::I8,
            "u16" | "H" => TypeCode::U16,
            "i16" | "h" => TypeCode::I16,
            "u32" | "I" => TypeCode::U32,
            "i32" | "i" => TypeCode::I32,
            "u64" | "Q" => TypeCode::U64,
            "i64" | "q" => TypeCode::I64,
            "f32" | "f" => TypeCode::F32,
            "f64" | "d" => TypeCode::F64,
            other => return Err(ArrayError::InvalidTypeCode(other.to_string())),
        };
        Ok(code)
    }
}

/// A fixed-width numeric type that can live in a [`TypedArray`](crate::TypedArray).
pub trait Element: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const TYPE_CODE: TypeCode;
    const WIDTH: usize;

    fn zero() -> Self;

    /// Narrow an integer, or `None` if it does not fit.
    fn try_from_i128(value: i128) -> Option<Self>;

    /// Parse a decimal (or `0x`-prefixed hex, for integers) value.
    fn parse_value(input: &str) -> Result<Self>;

    /// Append `self` to `dst` in the given byte order.
    fn put<B: BufMut>(self, dst: &mut B, endian: Endian);

    /// Consume one element from `src`. Callers guarantee `WIDTH` bytes remain.
    fn take<B: Buf>(src: &mut B, endian: Endian) -> Self;

    /// Addition that wraps for integers and follows IEEE-754 for floats.
    fn wrapping_add(self, rhs: Self) -> Self;

    fn swap_bytes(self) -> Self;
}

macro_rules! int_element {
    ($ty:ty, $code:expr, $put_le:ident, $put_be:ident, $get_le:ident, $get_be:ident) => {
        impl Element for $ty {
            const TYPE_CODE: TypeCode = $code;
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn zero() -> Self {
                0
            }

            fn try_from_i128(value: i128) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }

            fn parse_value(input: &str) -> Result<Self> {
                let wide = parse_int(input).ok_or_else(|| ArrayError::InvalidNumber {
                    input: input.to_string(),
                    type_code: $code,
                })?;
                Self::try_from_i128(wide).ok_or(ArrayError::ValueOutOfRange {
                    value: wide,
                    type_code: $code,
                })
            }

            fn put<B: BufMut>(self, dst: &mut B, endian: Endian) {
                match endian {
                    Endian::Little => dst.$put_le(self),
                    Endian::Big => dst.$put_be(self),
                }
            }

            fn take<B: Buf>(src: &mut B, endian: Endian) -> Self {
                match endian {
                    Endian::Little => src.$get_le(),
                    Endian::Big => src.$get_be(),
                }
            }

            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            fn swap_bytes(self) -> Self {
                <$ty>::swap_bytes(self)
            }
        }
    };
}

macro_rules! float_element {
    ($ty:ty, $code:expr, $put_le:ident, $put_be:ident, $get_le:ident, $get_be:ident) => {
        impl Element for $ty {
            const TYPE_CODE: TypeCode = $code;
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn zero() -> Self {
                0.0
            }

            fn try_from_i128(value: i128) -> Option<Self> {
                Some(value as $ty)
            }

            fn parse_value(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<$ty>()
                    .map_err(|_| ArrayError::InvalidNumber {
                        input: input.to_string(),
                        type_code: $code,
                    })
            }

            fn put<B: BufMut>(self, dst: &mut B, endian: Endian) {
                match endian {
                    Endian::Little => dst.$put_le(self),
                    Endian::Big => dst.$put_be(self),
                }
            }

            fn take<B: Buf>(src: &mut B, endian: Endian) -> Self {
                match endian {
                    Endian::Little => src.$get_le(),
                    Endian::Big => src.$get_be(),
                }
            }

            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            fn swap_bytes(self) -> Self {
                <$ty>::from_bits(self.to_bits().swap_bytes())
            }
        }
    };
}

// Single bytes have no byte order.
int_element!(u8, TypeCode::U8, put_u8, put_u8, get_u8, get_u8);
int_element!(i8, TypeCode::I8, put_i8, put_i8, get_i8, get_i8);
int_element!(u16, TypeCode::U16, put_u16_le, put_u16, get_u16_le, get_u16);
int_element!(i16, TypeCode::I16, put_i16_le, put_i16, get_i16_le, get_i16);
int_element!(u32, TypeCode::U32, put_u32_le, put_u32, get_u32_le, get_u32);
int_element!(i32, TypeCode::I32, put_i32_le, put_i32, get_i32_le, get_i32);
int_element!(u64, TypeCode::U64, put_u64_le, put_u64, get_u64_le, get_u64);
int_element!(i64, TypeCode::I64, put_i64_le, put_i64, get_i64_le, get_i64);
float_element!(f32, TypeCode::F32, put_f32_le, put_f32, get_f32_le, get_f32);
float_element!(f64, TypeCode::F64, put_f64_le, put_f64, get_f64_le, get_f64);

/// Parse an optionally signed decimal or `0x`-prefixed hex integer.
///
/// At most one leading sign is accepted and the digits that follow must be
/// bare; `"--5"` and `"0x-5"` are rejected.
fn parse_int(input: &str) -> Option<i128> {
    let input = input.trim();
    let (negative, unsigned) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_code_widths_match_elements() {
        assert_eq!(TypeCode::U8.width(), u8::WIDTH);
        assert_eq!(TypeCode::I16.width(), i16::WIDTH);
        assert_eq!(TypeCode::U32.width(), u32::WIDTH);
        assert_eq!(TypeCode::F32.width(), f32::WIDTH);
        assert_eq!(TypeCode::I64.width(), i64::WIDTH);
        assert_eq!(TypeCode::F64.width(), f64::WIDTH);
    }

    #[test]
    fn type_code_parses_names_and_letters() {
        for code in TypeCode::ALL {
            assert_eq!(code.name().parse::<TypeCode>().unwrap(), code);
        }
        assert_eq!("B".parse::<TypeCode>().unwrap(), TypeCode::U8);
        assert_eq!("i".parse::<TypeCode>().unwrap(), TypeCode::I32);
        assert_eq!("d".parse::<TypeCode>().unwrap(), TypeCode::F64);
        assert!(matches!(
            "u128".parse::<TypeCode>(),
            Err(ArrayError::InvalidTypeCode(_))
        ));
    }

    #[test]
    fn signedness() {
        assert!(!TypeCode::U16.is_signed());
        assert!(TypeCode::I16.is_signed());
        assert!(TypeCode::F32.is_signed());
        assert!(TypeCode::F32.is_float());
    }

    #[test]
    fn parse_value_checks_range() {
        assert_eq!(u8::parse_value("255").unwrap(), 255);
        assert_eq!(u8::parse_value("0xff").unwrap(), 255);
        assert_eq!(i8::parse_value("-128").unwrap(), -128);
        assert_eq!(i16::parse_value("-0x10").unwrap(), -16);

        assert!(matches!(
            u8::parse_value("256"),
            Err(ArrayError::ValueOutOfRange {
                value: 256,
                type_code: TypeCode::U8
            })
        ));
        assert!(matches!(
            u32::parse_value("-1"),
            Err(ArrayError::ValueOutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            u32::parse_value("one"),
            Err(ArrayError::InvalidNumber { .. })
        ));
        assert_eq!(i32::parse_value("+7").unwrap(), 7);
        for malformed in ["--5", "0x-5", "-0x-5", "+-1", "-", "0x", "1_000", ""] {
            assert!(
                matches!(
                    i32::parse_value(malformed),
                    Err(ArrayError::InvalidNumber { .. })
                ),
                "{malformed:?} should not parse"
            );
        }
        assert_eq!(f32::parse_value("1.5").unwrap(), 1.5);
        assert!(f64::parse_value("x").is_err());
    }

    #[test]
    fn doubled_sign_with_extreme_magnitude_is_an_error() {
        let input = "--170141183460469231731687303715884105728";
        assert!(matches!(
            i64::parse_value(input),
            Err(ArrayError::InvalidNumber { .. })
        ));
        assert!(matches!(
            i64::parse_value("-170141183460469231731687303715884105728"),
            Err(ArrayError::InvalidNumber { .. })
        ));
        assert!(matches!(
            i64::parse_value("-170141183460469231731687303715884105727"),
            Err(ArrayError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn integer_addition_wraps() {
        assert_eq!(Element::wrapping_add(250u8, 10u8), 4);
        assert_eq!(Element::wrapping_add(i8::MAX, 1i8), i8::MIN);
        assert_eq!(Element::wrapping_add(u32::MAX, 2u32), 1);
    }

    #[test]
    fn float_swap_bytes_round_trips() {
        let value = 3.25f64;
        assert_eq!(Element::swap_bytes(Element::swap_bytes(value)), value);
    }
}
