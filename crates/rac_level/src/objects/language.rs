//! Localized text records.
//!
//! The text length is not stored anywhere: the blob is discovered by
//! scanning forward four bytes at a time until a chunk carries a zero
//! terminator, the same way the game's own loader walks it.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::raw;

/// One localized string: two id ints, then a 4-byte-aligned, zero-padded
/// text blob.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageData {
    pub id: i32,
    pub secondary_id: i32,
    /// Raw text bytes with the zero padding stripped. Kept as bytes because
    /// the games ship strings in several single-byte encodings.
    pub text: Vec<u8>,
}

impl LanguageData {
    pub const HEADER_LEN: usize = 0x08;

    /// Reads one record starting at `offset`. Fails with
    /// [`Error::UnterminatedText`] when the section ends before a zero
    /// terminator shows up.
    pub fn read(buf: &[u8], offset: usize) -> Result<LanguageData> {
        let id = raw::read_i32(buf, offset);
        let secondary_id = raw::read_i32(buf, offset + 0x04);

        let mut text = Vec::new();
        let mut cursor = offset + LanguageData::HEADER_LEN;
        loop {
            let Some(chunk) = buf.get(cursor..cursor + 4) else {
                return Err(Error::UnterminatedText { offset });
            };
            text.extend(chunk.iter().copied().filter(|&b| b != 0));
            if chunk.contains(&0) {
                break;
            }
            cursor += 4;
        }

        Ok(LanguageData {
            id,
            secondary_id,
            text,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_len()];
        raw::write_i32(&mut out, 0x00, self.id);
        raw::write_i32(&mut out, 0x04, self.secondary_id);
        out[LanguageData::HEADER_LEN..LanguageData::HEADER_LEN + self.text.len()]
            .copy_from_slice(&self.text);
        out
    }

    /// Header plus the text rounded up to the next 4-byte boundary, always
    /// leaving at least one zero terminator (a full zero chunk when the
    /// text length is already aligned).
    pub fn encoded_len(&self) -> usize {
        LanguageData::HEADER_LEN + (self.text.len() / 4 + 1) * 4
    }

    /// The text as UTF-8, with replacement characters for anything that
    /// is not.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scans_to_aligned_terminator() -> Result<()> {
        #[rustfmt::skip]
        let input: Vec<u8> = vec![
            0x2A, 0x00, 0x00, 0x00, // id = 42
            0x01, 0x00, 0x00, 0x00, // secondary id
            b'B', b'o', b'l', b't', // text...
            b's', 0x00, 0x00, 0x00, // ...padded to alignment
        ];

        let data = LanguageData::read(&input, 0)?;
        assert_eq!(data.id, 42);
        assert_eq!(data.text_lossy(), "Bolts");
        assert_eq!(data.encoded_len(), input.len());
        assert_eq!(data.to_bytes(), input);
        Ok(())
    }

    #[test]
    fn aligned_text_gets_a_full_zero_chunk() -> Result<()> {
        let data = LanguageData {
            id: 1,
            secondary_id: 0,
            text: b"Gold".to_vec(),
        };
        let bytes = data.to_bytes();
        assert_eq!(bytes.len(), 0x10);
        assert_eq!(&bytes[0x0C..], &[0, 0, 0, 0]);
        assert_eq!(LanguageData::read(&bytes, 0)?, data);
        Ok(())
    }

    #[test]
    fn missing_terminator_is_fatal() {
        let input = [0x01, 0, 0, 0, 0x02, 0, 0, 0, b'a', b'b', b'c', b'd'];
        assert!(matches!(
            LanguageData::read(&input, 0),
            Err(Error::UnterminatedText { offset: 0 })
        ));
    }
}
