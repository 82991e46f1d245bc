//! The metadata root (ECMA-335 II.24.2.1).

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// Magic signature of the metadata root, `BSJB`
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The metadata root header and its stream directory.
pub struct Root {
    /// Always [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, ignored by the runtime
    pub major_version: u16,
    /// Minor version, ignored by the runtime
    pub minor_version: u16,
    /// Runtime version string, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved, always 0
    pub flags: u16,
    /// Directory of the streams that follow the header
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parses the metadata root at the start of `data`.
    ///
    /// Every stream in the directory is checked to lie within `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a wrong signature, an invalid stream directory or
    /// stream ranges that exceed the metadata, and [`crate::Error::OutOfBounds`] for truncated
    /// input.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 32 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {}",
                signature
            ));
        }

        let version_length = read_le_at::<u32>(data, &mut 12)? as usize;
        let Some(version_end) = version_length.checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_length
            ));
        };

        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version = String::from_utf8_lossy(&data[16..version_end])
            .trim_end_matches('\0')
            .to_string();

        let mut cursor = version_end;
        let flags = read_le_at::<u16>(data, &mut cursor)?;
        let stream_count = read_le_at::<u16>(data, &mut cursor)?;
        if stream_count == 0 || stream_count > 6 {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut stream_headers: Vec<StreamHeader> = Vec::with_capacity(stream_count as usize);
        let mut stream_offset = version_end + 4;
        for _ in 0..stream_count {
            if stream_offset >= data.len() {
                return Err(OutOfBounds);
            }

            let stream = StreamHeader::from(&data[stream_offset..])?;
            match stream.offset.checked_add(stream.size) {
                Some(end) if end as usize <= data.len() => {}
                Some(_) => return Err(OutOfBounds),
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            if stream_headers.iter().any(|known| known.name == stream.name) {
                return Err(malformed_error!("Duplicate stream - {}", stream.name));
            }

            stream_offset += stream.header_size();
            stream_headers.push(stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            version,
            flags,
            stream_headers,
        })
    }

    /// Returns the bytes of the stream called `name`, if present
    #[must_use]
    pub fn stream<'a>(&self, data: &'a [u8], name: &str) -> Option<&'a [u8]> {
        self.stream_headers
            .iter()
            .find(|header| header.name == name)
            .and_then(|header| {
                data.get(header.offset as usize..(header.offset + header.size) as usize)
            })
    }
}
