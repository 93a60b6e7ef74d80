use alloc::vec::Vec;

/// Owned accumulator for a literal whose bytes cannot be borrowed from the
/// current chunk: it spans a `feed` boundary or contains escapes.
///
/// The buffer is empty between tokens. Capacity is kept after `clear`, so a
/// long literal pays for growth once and later literals reuse the space.
#[derive(Debug, Default)]
pub(crate) struct ScratchBuffer {
    bytes: Vec<u8>,
    in_use: bool,
}

impl ScratchBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the current literal lives here rather than in the chunk.
    #[inline]
    pub(crate) fn in_use(&self) -> bool {
        self.in_use
    }

    #[inline]
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        self.in_use = true;
    }

    #[inline]
    pub(crate) fn push_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.extend(ch.encode_utf8(&mut tmp).as_bytes());
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
        self.in_use = false;
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }
}
