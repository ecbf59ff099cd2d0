use std::ops::{Deref, DerefMut};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::error::{check_range, BufferError, Result};
use crate::view::{BufferView, BufferViewMut};

/// Convert an integer to a byte, rejecting anything outside 0-255.
///
/// Values are never truncated: `300` is an error, not `44`.
pub fn checked_byte(value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| BufferError::ValueOutOfRange { value })
}

/// An owned, growable sequence of bytes.
///
/// Every mutating method may reallocate the backing storage. Views taken with
/// [`ByteBuffer::view`] or [`ByteBuffer::view_mut`] borrow the buffer, so the
/// borrow checker keeps them from outliving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer with room for at least `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer of `len` zero bytes.
    pub fn zeroed(len: usize) -> Self {
        Self { data: vec![0; len] }
    }

    /// Create a buffer from integers, each of which must fit in a byte.
    pub fn try_from_ints<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let data = values
            .into_iter()
            .map(checked_byte)
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self { data })
    }

    /// Create a buffer holding the UTF-8 bytes of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            data: text.as_bytes().to_vec(),
        }
    }

    /// Decode a hex string such as `"aa 10 ff"`. Whitespace is ignored.
    pub fn from_hex(input: &str) -> Result<Self> {
        let compact: String = input.split_whitespace().collect();
        Ok(Self {
            data: hex::decode(compact)?,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserve room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Shorten the buffer to `len` bytes. No-op if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Read the byte at `index`.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.data
            .get(index)
            .copied()
            .ok_or(BufferError::IndexOutOfRange {
                index,
                len: self.data.len(),
            })
    }

    /// Overwrite the byte at `index`.
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Overwrite the byte at `index` with an integer that must fit in a byte.
    pub fn set_int(&mut self, index: usize, value: i64) -> Result<()> {
        let byte = checked_byte(value)?;
        self.set(index, byte)
    }

    /// Copy `[start, end)` into a new buffer.
    pub fn slice_get(&self, start: usize, end: usize) -> Result<ByteBuffer> {
        check_range(start, end, self.data.len())?;
        Ok(Self {
            data: self.data[start..end].to_vec(),
        })
    }

    /// Replace `[start, end)` with `values`.
    ///
    /// `values` may be shorter or longer than the range; the buffer shrinks or
    /// grows to fit.
    pub fn slice_set(&mut self, start: usize, end: usize, values: &[u8]) -> Result<()> {
        check_range(start, end, self.data.len())?;
        let before = self.data.len();
        self.data.splice(start..end, values.iter().copied());
        if self.data.len() != before {
            trace!(before, after = self.data.len(), "slice assignment resized buffer");
        }
        Ok(())
    }

    /// Push a byte onto the end.
    pub fn append(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Push an integer that must fit in a byte onto the end.
    pub fn append_int(&mut self, value: i64) -> Result<()> {
        self.data.push(checked_byte(value)?);
        Ok(())
    }

    pub fn extend_from_slice(&mut self, values: &[u8]) {
        self.data.extend_from_slice(values);
    }

    /// Insert a byte before `index`. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: u8) -> Result<()> {
        let len = self.data.len();
        if index > len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }
        self.data.insert(index, value);
        Ok(())
    }

    /// Remove and return the byte at `index`.
    pub fn delete(&mut self, index: usize) -> Result<u8> {
        let len = self.data.len();
        if index >= len {
            return Err(BufferError::IndexOutOfRange { index, len });
        }
        Ok(self.data.remove(index))
    }

    /// Snapshot the current contents. Later mutation of `self` is not
    /// reflected in the returned bytes.
    pub fn to_owned_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    /// Convert into immutable `Bytes` without copying.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.data)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow the contents as UTF-8 text.
    pub fn decode_utf8(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.data)?)
    }

    /// Lowercase hex rendering with no separators.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }

    /// Take a read-only view over `[start, end)`.
    pub fn view(&self, start: usize, end: usize) -> Result<BufferView<'_>> {
        BufferView::new(self, start, end)
    }

    /// Take a writable view over `[start, end)`.
    pub fn view_mut(&mut self, start: usize, end: usize) -> Result<BufferViewMut<'_>> {
        BufferViewMut::new(self, start, end)
    }

    /// A read-only view over the whole buffer.
    pub fn full_view(&self) -> BufferView<'_> {
        BufferView::whole(self)
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for ByteBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuffer {
    fn from(data: [u8; N]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl From<Bytes> for ByteBuffer {
    fn from(bytes: Bytes) -> Self {
        Self {
            data: bytes.into(),
        }
    }
}

impl From<BytesMut> for ByteBuffer {
    fn from(bytes: BytesMut) -> Self {
        Self {
            data: bytes.into(),
        }
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.data
    }
}

impl Extend<u8> for ByteBuffer {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        self.data.extend(iter);
    }
}

impl<'a> Extend<&'a u8> for ByteBuffer {
    fn extend<T: IntoIterator<Item = &'a u8>>(&mut self, iter: T) {
        self.data.extend(iter);
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ByteBuffer {
    type Item = u8;
    type IntoIter = std::vec::IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a ByteBuffer {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for ByteBuffer {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.data == other
    }
}
