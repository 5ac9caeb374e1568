use bytes::Buf;

/// A read cursor over a borrowed byte slice.
///
/// The cursor keeps the read offset into the slice it was created from, so
/// the position stays available for diagnostics while decoding.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// The unread bytes, borrowed for the lifetime of the input.
    #[inline]
    pub fn chunk_shared_lifetime(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Read a big-endian `u16` at the current position without consuming it.
    #[inline]
    pub fn peek_u16(&self) -> Option<u16> {
        self.chunk_shared_lifetime()
            .get(..2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
    }
}

impl<'a> Buf for Cursor<'a> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining());
        self.pos += cnt;
    }
}
