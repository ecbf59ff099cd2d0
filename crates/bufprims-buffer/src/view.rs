use std::ops::Range;

use tracing::debug;

use crate::buffer::{checked_byte, ByteBuffer};
use crate::error::{check_range, BufferError, Result};

/// Absolute `[start, end)` window into a buffer, resolved on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: usize,
    end: usize,
}

impl Window {
    fn new(start: usize, end: usize, buffer_len: usize) -> Result<Self> {
        check_range(start, end, buffer_len)?;
        Ok(Self { start, end })
    }

    fn len(self) -> usize {
        self.end - self.start
    }

    /// The live byte range, or `StaleView` if the buffer no longer covers it.
    fn resolve(self, buffer_len: usize) -> Result<Range<usize>> {
        if self.end > buffer_len {
            debug!(
                start = self.start,
                end = self.end,
                len = buffer_len,
                "view outlived buffer shrink"
            );
            return Err(BufferError::StaleView {
                start: self.start,
                end: self.end,
                len: buffer_len,
            });
        }
        Ok(self.start..self.end)
    }

    /// Translate a view-relative index into a buffer index.
    fn absolute(self, index: usize, buffer_len: usize) -> Result<usize> {
        if index >= self.len() {
            return Err(BufferError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        self.resolve(buffer_len)?;
        Ok(self.start + index)
    }

    /// Narrow to a view-relative `[start, end)`.
    fn narrow(self, start: usize, end: usize) -> Result<Self> {
        check_range(start, end, self.len())?;
        Ok(Self {
            start: self.start + start,
            end: self.start + end,
        })
    }
}

/// A read-only, zero-copy window into a [`ByteBuffer`].
///
/// Indices are relative to the start of the view. Bounds are checked against
/// the buffer's current length each time the view is read.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    buffer: &'a ByteBuffer,
    window: Window,
}

impl<'a> BufferView<'a> {
    /// Create a view over `buffer[start..end]`.
    pub fn new(buffer: &'a ByteBuffer, start: usize, end: usize) -> Result<Self> {
        Ok(Self {
            buffer,
            window: Window::new(start, end, buffer.len())?,
        })
    }

    pub(crate) fn whole(buffer: &'a ByteBuffer) -> Self {
        Self {
            buffer,
            window: Window {
                start: 0,
                end: buffer.len(),
            },
        }
    }

    /// Offset of the view's first byte within the underlying buffer.
    pub fn start(&self) -> usize {
        self.window.start
    }

    /// Offset one past the view's last byte within the underlying buffer.
    pub fn end(&self) -> usize {
        self.window.end
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<u8> {
        let at = self.window.absolute(index, self.buffer.len())?;
        self.buffer.get(at)
    }

    /// A narrower view sharing the same buffer. Offsets are relative to `self`.
    pub fn sub_view(&self, start: usize, end: usize) -> Result<BufferView<'a>> {
        Ok(Self {
            buffer: self.buffer,
            window: self.window.narrow(start, end)?,
        })
    }

    /// Borrow the viewed bytes directly.
    pub fn as_slice(&self) -> Result<&'a [u8]> {
        let range = self.window.resolve(self.buffer.len())?;
        let buffer: &'a ByteBuffer = self.buffer;
        Ok(&buffer.as_slice()[range])
    }

    /// Copy the viewed bytes into a new, independent buffer.
    pub fn to_bytes(&self) -> Result<ByteBuffer> {
        Ok(ByteBuffer::from(self.as_slice()?))
    }

    /// Copy the viewed bytes out as plain integers.
    pub fn to_value_list(&self) -> Result<Vec<u8>> {
        Ok(self.as_slice()?.to_vec())
    }

    /// Borrow the viewed bytes as UTF-8 text.
    pub fn decode_utf8(&self) -> Result<&'a str> {
        Ok(std::str::from_utf8(self.as_slice()?)?)
    }
}

/// A writable, zero-copy window into a [`ByteBuffer`].
///
/// Writes land directly in the underlying buffer. The view holds the buffer's
/// exclusive borrow, so no other alias can observe the buffer until the view
/// is dropped.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    buffer: &'a mut ByteBuffer,
    window: Window,
}

impl<'a> BufferViewMut<'a> {
    /// Create a writable view over `buffer[start..end]`.
    pub fn new(buffer: &'a mut ByteBuffer, start: usize, end: usize) -> Result<Self> {
        let window = Window::new(start, end, buffer.len())?;
        Ok(Self { buffer, window })
    }

    pub fn start(&self) -> usize {
        self.window.start
    }

    pub fn end(&self) -> usize {
        self.window.end
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<u8> {
        let at = self.window.absolute(index, self.buffer.len())?;
        self.buffer.get(at)
    }

    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        let at = self.window.absolute(index, self.buffer.len())?;
        self.buffer.set(at, value)
    }

    /// Write an integer that must fit in a byte.
    pub fn set_int(&mut self, index: usize, value: i64) -> Result<()> {
        let byte = checked_byte(value)?;
        self.set(index, byte)
    }

    /// Reborrow as a read-only view of the same window.
    pub fn as_view(&self) -> BufferView<'_> {
        BufferView {
            buffer: &*self.buffer,
            window: self.window,
        }
    }

    /// A narrower read-only view. Offsets are relative to `self`.
    pub fn sub_view(&self, start: usize, end: usize) -> Result<BufferView<'_>> {
        Ok(BufferView {
            buffer: &*self.buffer,
            window: self.window.narrow(start, end)?,
        })
    }

    /// A narrower writable view. Offsets are relative to `self`.
    pub fn sub_view_mut(&mut self, start: usize, end: usize) -> Result<BufferViewMut<'_>> {
        let window = self.window.narrow(start, end)?;
        Ok(BufferViewMut {
            buffer: &mut *self.buffer,
            window,
        })
    }

    pub fn as_slice(&self) -> Result<&[u8]> {
        let range = self.window.resolve(self.buffer.len())?;
        Ok(&self.buffer.as_slice()[range])
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
        let range = self.window.resolve(self.buffer.len())?;
        Ok(&mut self.buffer.as_mut_slice()[range])
    }

    /// Set every byte in the window to `value`.
    pub fn fill(&mut self, value: u8) -> Result<()> {
        self.as_mut_slice()?.fill(value);
        Ok(())
    }

    /// Overwrite the window with `src`, which must be exactly as long.
    pub fn copy_from_slice(&mut self, src: &[u8]) -> Result<()> {
        let len = self.len();
        if src.len() != len {
            return Err(BufferError::InvalidRange {
                start: 0,
                end: src.len(),
                len,
            });
        }
        self.as_mut_slice()?.copy_from_slice(src);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<ByteBuffer> {
        Ok(ByteBuffer::from(self.as_slice()?))
    }

    pub fn to_value_list(&self) -> Result<Vec<u8>> {
        Ok(self.as_slice()?.to_vec())
    }

    pub fn decode_utf8(&self) -> Result<&str> {
        Ok(std::str::from_utf8(self.as_slice()?)?)
    }
}
