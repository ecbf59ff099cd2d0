use bufprims_buffer::{BufferView, ByteBuffer};
use bytes::{Buf, BytesMut};
use tracing::trace;

use crate::element::{Element, TypeCode};
use crate::endian::Endian;
use crate::error::{ArrayError, Result};

/// An owned sequence of elements that all share the type `T`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedArray<T> {
    items: Vec<T>,
}

impl<T: Element> TypedArray<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// An array of `len` zero elements.
    pub fn zeroed(len: usize) -> Self {
        Self {
            items: vec![T::zero(); len],
        }
    }

    pub fn from_slice(values: &[T]) -> Self {
        Self {
            items: values.to_vec(),
        }
    }

    /// Build from integers, each of which must fit in `T`.
    pub fn try_from_ints<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let items = values
            .into_iter()
            .map(|value| {
                T::try_from_i128(i128::from(value)).ok_or(ArrayError::ValueOutOfRange {
                    value: i128::from(value),
                    type_code: T::TYPE_CODE,
                })
            })
            .collect::<Result<Vec<T>>>()?;
        Ok(Self { items })
    }

    /// Build from textual values, e.g. command line arguments.
    pub fn parse<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = values
            .into_iter()
            .map(|value| T::parse_value(value.as_ref()))
            .collect::<Result<Vec<T>>>()?;
        Ok(Self { items })
    }

    pub fn type_code(&self) -> TypeCode {
        T::TYPE_CODE
    }

    /// Size of one element in bytes.
    pub fn width(&self) -> usize {
        T::WIDTH
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Packed size in bytes.
    pub fn byte_len(&self) -> usize {
        self.items.len() * T::WIDTH
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.items
            .get(index)
            .copied()
            .ok_or(ArrayError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ArrayError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.items.extend_from_slice(values);
    }

    /// Insert before `index`. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.items.len();
        if index > len {
            return Err(ArrayError::IndexOutOfRange { index, len });
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        let len = self.items.len();
        if index >= len {
            return Err(ArrayError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Pack every element into a new buffer in the given byte order.
    pub fn to_bytes(&self, endian: Endian) -> ByteBuffer {
        let mut dst = BytesMut::with_capacity(self.byte_len());
        for value in &self.items {
            value.put(&mut dst, endian);
        }
        ByteBuffer::from(dst)
    }

    /// Unpack a buffer produced by [`TypedArray::to_bytes`] with the same byte order.
    pub fn from_bytes(endian: Endian, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % T::WIDTH != 0 {
            trace!(
                len = bytes.len(),
                width = T::WIDTH,
                "misaligned typed unpack"
            );
            return Err(ArrayError::Alignment {
                len: bytes.len(),
                width: T::WIDTH,
            });
        }

        let mut src = bytes;
        let mut items = Vec::with_capacity(bytes.len() / T::WIDTH);
        while src.has_remaining() {
            items.push(T::take(&mut src, endian));
        }
        Ok(Self { items })
    }

    /// Unpack the bytes a view currently covers.
    pub fn from_view(endian: Endian, view: &BufferView<'_>) -> Result<Self> {
        Self::from_bytes(endian, view.as_slice()?)
    }

    /// Add `rhs` to every element, wrapping on integer overflow.
    pub fn wrapping_add_all(&mut self, rhs: T) {
        for item in &mut self.items {
            *item = item.wrapping_add(rhs);
        }
    }

    /// Sum of all elements, wrapping on integer overflow.
    pub fn wrapping_sum(&self) -> T {
        self.items
            .iter()
            .fold(T::zero(), |acc, item| acc.wrapping_add(*item))
    }

    /// Reverse the byte order of every element in place.
    pub fn byteswap(&mut self) {
        for item in &mut self.items {
            *item = item.swap_bytes();
        }
    }
}

impl<T: Element> From<Vec<T>> for TypedArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Element> Extend<T> for TypedArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Element> FromIterator<T> for TypedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for TypedArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TypedArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
