//! Bounded chunk writer over the shared output buffer.

use core::fmt;

/// View of the output buffer for one interpreter call.
///
/// Starts empty on every call; the transmitted length is the content
/// length, never the capacity. Writes past the end are cut at a character
/// boundary and the chunk is flagged truncated.
pub struct OutputBuffer<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> OutputBuffer<'a> {
    /// Empty view over `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            truncated: false,
        }
    }

    /// Append `s`, keeping as much as fits.
    ///
    /// Returns `false` if anything was cut.
    pub fn push_str(&mut self, s: &str) -> bool {
        let available = self.buf.len() - self.len;
        let mut take = s.len().min(available);
        while !s.is_char_boundary(take) {
            take -= 1;
        }

        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;

        if take < s.len() {
            self.truncated = true;
            false
        } else {
            true
        }
    }

    /// Discard everything written so far in this chunk.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Content written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Content written so far as text.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// Whether some write in this chunk did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Write for OutputBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.push_str(s) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}
