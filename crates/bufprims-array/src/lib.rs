//! Typed numeric arrays that pack to and unpack from byte buffers.
//!
//! A [`TypedArray<T>`] holds elements of exactly one numeric type. Packing is a
//! pure function of the values, the element width and the [`Endian`] chosen:
//!
//! ```text
//! TypedArray<u16> [0x0102, 0x0304]
//!   Little -> 02 01 04 03
//!   Big    -> 01 02 03 04
//! ```
//!
//! Integer arithmetic helpers wrap modulo 2^width (two's complement for signed
//! types) and never panic on overflow.
//!
//! [`DynArray`] and [`TypeCode`] select the element type at runtime, for callers
//! such as the command line that only learn the type from user input.

pub mod array;
pub mod dynamic;
pub mod element;
pub mod endian;
pub mod error;

pub use array::TypedArray;
pub use dynamic::DynArray;
pub use element::{Element, TypeCode};
pub use endian::Endian;
pub use error::{ArrayError, Result};
