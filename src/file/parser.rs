//! Cursor-based reader for ECMA-335 blob encodings.
//!
//! Signatures and other blob heap entries pack integers with the variable-length scheme of
//! ECMA-335 II.23.2. [`Parser`] keeps a position into a borrowed slice and decodes those
//! encodings on top of the primitive reads from [`crate::file::io`].

use crate::{
    file::io::{read_le_at, CilIO},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// A forward-only reader over a byte slice.
///
/// ```rust,ignore
/// let mut parser = Parser::new(&[0x81, 0x23, 0x05]);
/// assert_eq!(parser.read_compressed_uint()?, 0x0123);
/// assert_eq!(parser.read_le::<u8>()?, 0x05);
/// ```
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the start of `data`
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// True while unread bytes remain
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Current position
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Skips a single byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at the end of the data.
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Skips `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `step` bytes remain.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if step > self.remaining() {
            return Err(OutOfBounds);
        }

        self.position += step;
        Ok(())
    }

    /// Returns the next byte without consuming it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at the end of the data.
    pub fn peek_byte(&self) -> Result<u8> {
        self.data.get(self.position).copied().ok_or(OutOfBounds)
    }

    /// Reads a little-endian primitive.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the value extends past the data.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Reads a compressed unsigned integer (ECMA-335 II.23.2).
    ///
    /// The high bits of the first byte select a 1, 2 or 4 byte big-endian encoding.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for the reserved `111xxxxx` prefix and
    /// [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let first_byte = self.read_le::<u8>()?;

        // 0xxxxxxx
        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        // 10xxxxxx xxxxxxxx
        if (first_byte & 0xC0) == 0x80 {
            let second_byte = self.read_le::<u8>()?;
            return Ok(((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte));
        }

        // 110xxxxx xxxxxxxx xxxxxxxx xxxxxxxx
        if (first_byte & 0xE0) == 0xC0 {
            let b1 = u32::from(self.read_le::<u8>()?);
            let b2 = u32::from(self.read_le::<u8>()?);
            let b3 = u32::from(self.read_le::<u8>()?);
            return Ok(((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3);
        }

        Err(malformed_error!("Invalid compressed uint - {}", first_byte))
    }

    /// Reads a compressed signed integer, as used for array lower bounds.
    ///
    /// The sign is carried in the least significant bit of the rotated value; the width of the
    /// encoding determines how the value is sign-extended.
    ///
    /// # Errors
    /// Same as [`Parser::read_compressed_uint`].
    pub fn read_compressed_int(&mut self) -> Result<i32> {
        let start = self.position;
        let unsigned = self.read_compressed_uint()?;

        let bits = match self.position - start {
            1 => 6,
            2 => 13,
            _ => 28,
        };

        let magnitude = unsigned >> 1;
        #[allow(clippy::cast_possible_wrap)]
        let value = if unsigned & 1 == 0 {
            magnitude as i32
        } else {
            (magnitude as i32) - (1_i32 << bits)
        };

        Ok(value)
    }

    /// Reads a compressed `TypeDefOrRefOrSpecEncoded` token (ECMA-335 II.23.2.8).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for the unused table tag `3`.
    pub fn read_compressed_token(&mut self) -> Result<Token> {
        let compressed_token = self.read_compressed_uint()?;

        let table: u32 = match compressed_token & 0x3 {
            0x0 => 0x0200_0000, // TypeDef
            0x1 => 0x0100_0000, // TypeRef
            0x2 => 0x1B00_0000, // TypeSpec
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token - {}",
                    compressed_token
                ))
            }
        };

        Ok(Token::new(table | (compressed_token >> 2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_uint() {
        let test_cases = vec![
            (vec![0x03], 0x03),
            (vec![0x7F], 0x7F),
            (vec![0x80, 0x80], 0x80),
            (vec![0xAE, 0x57], 0x2E57),
            (vec![0xBF, 0xFF], 0x3FFF),
            (vec![0xC0, 0x00, 0x40, 0x00], 0x4000),
            (vec![0xDF, 0xFF, 0xFF, 0xFF], 0x1FFF_FFFF),
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            let result = parser.read_compressed_uint().unwrap();
            assert_eq!(result, expected, "input {:02X?}", input);
            assert!(!parser.has_more_data());
        }
    }

    #[test]
    fn compressed_uint_invalid() {
        let mut parser = Parser::new(&[0xE0, 0x00, 0x00, 0x00]);
        assert!(parser.read_compressed_uint().is_err());

        let mut parser = Parser::new(&[0x80]);
        assert!(matches!(parser.read_compressed_uint(), Err(OutOfBounds)));
    }

    #[test]
    fn compressed_int() {
        let test_cases = vec![
            (vec![0x06], 3),
            (vec![0x7B], -3),
            (vec![0x80, 0x80], 64),
            (vec![0x01], -64),
            (vec![0xC0, 0x00, 0x40, 0x00], 8192),
            (vec![0x80, 0x01], -8192),
            (vec![0xDF, 0xFF, 0xFF, 0xFE], 268_435_455),
            (vec![0xC0, 0x00, 0x00, 0x01], -268_435_456),
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_compressed_int().unwrap(), expected);
        }
    }

    #[test]
    fn compressed_token() {
        let mut parser = Parser::new(&[0x49]);
        assert_eq!(parser.read_compressed_token().unwrap().value(), 0x0100_0012);

        let mut parser = Parser::new(&[0x08]);
        assert_eq!(parser.read_compressed_token().unwrap().value(), 0x0200_0002);

        let mut parser = Parser::new(&[0x0A]);
        assert_eq!(parser.read_compressed_token().unwrap().value(), 0x1B00_0002);

        let mut parser = Parser::new(&[0x0B]);
        assert!(parser.read_compressed_token().is_err());
    }

    #[test]
    fn cursor_operations() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.peek_byte().unwrap(), 0x01);
        parser.advance().unwrap();
        assert_eq!(parser.pos(), 1);
        parser.advance_by(2).unwrap();
        assert_eq!(parser.remaining(), 1);
        assert!(parser.advance_by(2).is_err());
        assert_eq!(parser.read_le::<u8>().unwrap(), 0x04);
        assert!(parser.peek_byte().is_err());
    }
}
