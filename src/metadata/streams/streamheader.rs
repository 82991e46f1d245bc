use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Stream names a metadata root may carry.
const VALID_STREAM_NAMES: [&str; 6] = ["#Strings", "#US", "#Blob", "#GUID", "#~", "#-"];

/// An entry of the stream directory that follows the metadata root.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamHeader {
    /// Offset of the stream, relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream, e.g. `#Strings`
    pub name: String,
}

impl StreamHeader {
    /// Reads a stream header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and
    /// [`crate::Error::Malformed`] for unknown stream names.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name_bytes = &data[8..std::cmp::min(data.len(), 8 + 32)];
        let name_len = name_bytes
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| malformed_error!("Stream header name is not terminated"))?;
        let name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();

        if !VALID_STREAM_NAMES.contains(&name.as_str()) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }

    /// Size of this header inside the stream directory, including the 4-byte aligned name
    #[must_use]
    pub fn header_size(&self) -> usize {
        8 + ((self.name.len() + 1 + 3) & !3)
    }
}
