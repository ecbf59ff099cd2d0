use bufprims_buffer::ByteBuffer;

use crate::array::TypedArray;
use crate::element::TypeCode;
use crate::endian::Endian;
use crate::error::Result;

/// A [`TypedArray`] whose element type is chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArray {
    U8(TypedArray<u8>),
    I8(TypedArray<i8>),
    U16(TypedArray<u16>),
    I16(TypedArray<i16>),
    U32(TypedArray<u32>),
    I32(TypedArray<i32>),
    U64(TypedArray<u64>),
    I64(TypedArray<i64>),
    F32(TypedArray<f32>),
    F64(TypedArray<f64>),
}

macro_rules! with_array {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            DynArray::U8($arr) => $body,
            DynArray::I8($arr) => $body,
            DynArray::U16($arr) => $body,
            DynArray::I16($arr) => $body,
            DynArray::U32($arr) => $body,
            DynArray::I32($arr) => $body,
            DynArray::U64($arr) => $body,
            DynArray::I64($arr) => $body,
            DynArray::F32($arr) => $body,
            DynArray::F64($arr) => $body,
        }
    };
}

macro_rules! by_code {
    ($code:expr, $build:ident, $($arg:expr),*) => {
        match $code {
            TypeCode::U8 => DynArray::U8(TypedArray::<u8>::$build($($arg),*)?),
            TypeCode::I8 => DynArray::I8(TypedArray::<i8>::$build($($arg),*)?),
            TypeCode::U16 => DynArray::U16(TypedArray::<u16>::$build($($arg),*)?),
            TypeCode::I16 => DynArray::I16(TypedArray::<i16>::$build($($arg),*)?),
            TypeCode::U32 => DynArray::U32(TypedArray::<u32>::$build($($arg),*)?),
            TypeCode::I32 => DynArray::I32(TypedArray::<i32>::$build($($arg),*)?),
            TypeCode::U64 => DynArray::U64(TypedArray::<u64>::$build($($arg),*)?),
            TypeCode::I64 => DynArray::I64(TypedArray::<i64>::$build($($arg),*)?),
            TypeCode::F32 => DynArray::F32(TypedArray::<f32>::$build($($arg),*)?),
            TypeCode::F64 => DynArray::F64(TypedArray::<f64>::$build($($arg),*)?),
        }
    };
}

impl DynArray {
    /// Parse textual values as elements of `code`.
    pub fn parse<S: AsRef<str>>(code: TypeCode, values: &[S]) -> Result<Self> {
        Ok(by_code!(code, parse, values.iter()))
    }

    /// Unpack `bytes` as elements of `code`.
    pub fn from_bytes(code: TypeCode, endian: Endian, bytes: &[u8]) -> Result<Self> {
        Ok(by_code!(code, from_bytes, endian, bytes))
    }

    pub fn type_code(&self) -> TypeCode {
        with_array!(self, arr => arr.type_code())
    }

    pub fn len(&self) -> usize {
        with_array!(self, arr => arr.len())
    }

    pub fn is_empty(&self) -> bool {
        with_array!(self, arr => arr.is_empty())
    }

    pub fn to_bytes(&self, endian: Endian) -> ByteBuffer {
        with_array!(self, arr => arr.to_bytes(endian))
    }

    /// Render each element with its `Display` form.
    pub fn to_strings(&self) -> Vec<String> {
        with_array!(self, arr => arr.iter().map(ToString::to_string).collect())
    }
}
