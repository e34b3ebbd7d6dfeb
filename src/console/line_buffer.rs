//! Line buffer for console input

use crate::config::INPUT_CAPACITY;

/// Fixed-capacity line of printable ASCII.
///
/// Used for both the line being edited and the last dispatched line.
#[derive(Clone)]
pub struct LineBuffer<const N: usize = INPUT_CAPACITY> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    /// Append a character.
    ///
    /// Returns `false` (and stores nothing) when the buffer is full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < N {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove last character.
    ///
    /// Returns `false` if the buffer was already empty.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            self.buf[self.len] = 0;
            true
        } else {
            false
        }
    }

    /// Clear buffer and zero its contents
    pub fn clear(&mut self) {
        self.buf.fill(0);
        self.len = 0;
    }

    /// Set buffer contents from string, truncating to capacity
    pub fn set(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let copy_len = bytes.len().min(N);
        self.buf.fill(0);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
    }

    /// Overwrite with the contents of `other`
    pub fn copy_from(&mut self, other: &Self) {
        self.buf = other.buf;
        self.len = other.len;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of characters
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Whole backing store, including the zeroed tail
    pub fn raw(&self) -> &[u8; N] {
        &self.buf
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for LineBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("LineBuffer").field(&self.as_str()).finish()
    }
}
