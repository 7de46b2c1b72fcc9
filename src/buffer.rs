use bytes::{Bytes, BytesMut};

/// Grow-on-append byte sequence used for encoder output and opaque content.
///
/// Unlike a C string this may hold embedded NUL bytes; length is tracked
/// explicitly and comparisons are raw byte comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: BytesMut,
}

impl ByteBuffer {
    pub fn new() -> Self {
        ByteBuffer { data: BytesMut::new() }
    }

    /// Capacity hints are advisory; growth stays amortised O(1) either way.
    pub fn with_capacity(cap: usize) -> Self {
        ByteBuffer { data: BytesMut::with_capacity(cap) }
    }

    /// Construct from a borrowed slice (copied).
    pub fn from_slice(data: &[u8]) -> Self {
        ByteBuffer { data: BytesMut::from(data) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn push(&mut self, byte: u8) {
        self.data.extend_from_slice(&[byte]);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a multi-byte unsigned integer: 7-bit groups, most significant
    /// group first, continuation bit 0x80 on every byte but the last.
    pub fn push_mb_u32(&mut self, value: u32) {
        let mut groups = [0u8; 5];
        let mut n = value;
        let mut count = 0;
        loop {
            groups[count] = (n & 0x7F) as u8;
            count += 1;
            n >>= 7;
            if n == 0 {
                break;
            }
        }
        for i in (0..count).rev() {
            let cont = if i == 0 { 0x00 } else { 0x80 };
            self.data.extend_from_slice(&[groups[i] | cont]);
        }
    }

    pub fn insert_front(&mut self, bytes: &[u8]) {
        let mut joined = BytesMut::with_capacity(bytes.len() + self.data.len());
        joined.extend_from_slice(bytes);
        joined.extend_from_slice(&self.data);
        self.data = joined;
    }

    pub fn delete_from_front(&mut self, count: usize) {
        let count = count.min(self.data.len());
        let _ = self.data.split_to(count);
    }

    /// First occurrence of `needle` at or after `from`, as a byte offset.
    pub fn find(&self, needle: &[u8], from: usize) -> Option<usize> {
        if needle.is_empty() || from > self.data.len() {
            return None;
        }
        self.data[from..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|p| p + from)
    }

    /// Remove leading and trailing ASCII whitespace.
    pub fn trim_blanks(&mut self) {
        let is_blank = |b: &u8| matches!(b, b' ' | b'\t' | b'\r' | b'\n');
        let start = self.data.iter().take_while(|b| is_blank(b)).count();
        let end = self.data.len() - self.data.iter().rev().take_while(|b| is_blank(b)).count();
        if start >= end {
            self.data.clear();
            return;
        }
        let _ = self.data.split_off(end);
        let _ = self.data.split_to(start);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Take ownership of the accumulated bytes.
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Decode a multi-byte unsigned integer from `data` starting at `*pos`.
///
/// Advances `*pos` past the integer. At most five bytes are consumed
/// (a u32 never needs more); a sixth continuation byte is an error.
pub fn read_mb_u32(data: &[u8], pos: &mut usize) -> crate::errors::Result<u32> {
    let mut value: u32 = 0;
    for i in 0.. {
        if i >= 5 {
            return Err(crate::errors::WbxmlError::InvalidMbUint);
        }
        let byte = *data.get(*pos).ok_or(crate::errors::WbxmlError::EndOfBuffer)?;
        *pos += 1;
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            break;
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(n: u32) -> Vec<u8> {
        let mut buf = ByteBuffer::new();
        buf.push_mb_u32(n);
        buf.into_vec()
    }

    #[test]
    fn mb_u32_seed_vectors() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x81, 0x00]);
        assert_eq!(encode(16384), vec![0x81, 0x80, 0x00]);
    }

    #[test]
    fn mb_u32_roundtrip() {
        for n in [0u32, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 0x0FD3, 0x1201, u32::MAX] {
            let bytes = encode(n);
            assert!((1..=5).contains(&bytes.len()));
            for (i, b) in bytes.iter().enumerate() {
                assert_eq!(b & 0x80 != 0, i + 1 != bytes.len());
            }
            let mut pos = 0;
            assert_eq!(read_mb_u32(&bytes, &mut pos).unwrap(), n);
            assert_eq!(pos, bytes.len());
        }
    }

    #[test]
    fn mb_u32_rejects_overlong() {
        let mut pos = 0;
        let overlong = [0x81, 0x81, 0x81, 0x81, 0x81, 0x00];
        assert_eq!(
            read_mb_u32(&overlong, &mut pos),
            Err(crate::errors::WbxmlError::InvalidMbUint)
        );
    }

    #[test]
    fn mb_u32_short_read() {
        let mut pos = 0;
        assert_eq!(
            read_mb_u32(&[0x81], &mut pos),
            Err(crate::errors::WbxmlError::EndOfBuffer)
        );
    }

    #[test]
    fn buffer_holds_embedded_nul() {
        let mut buf = ByteBuffer::new();
        buf.extend(b"a\0b");
        buf.push(0);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_slice(), b"a\0b\0");
    }

    #[test]
    fn front_editing_and_search() {
        let mut buf = ByteBuffer::from_slice(b"world");
        buf.insert_front(b"hello ");
        assert_eq!(buf.as_slice(), b"hello world");
        assert_eq!(buf.find(b"world", 0), Some(6));
        assert_eq!(buf.find(b"world", 7), None);
        buf.delete_from_front(6);
        assert_eq!(buf.as_slice(), b"world");
    }

    #[test]
    fn trim_blanks_edges() {
        let mut buf = ByteBuffer::from_slice(b"  \thello\n ");
        buf.trim_blanks();
        assert_eq!(buf.as_slice(), b"hello");

        let mut blank = ByteBuffer::from_slice(b" \r\n\t");
        blank.trim_blanks();
        assert!(blank.is_empty());
    }
}
