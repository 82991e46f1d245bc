//! The CLI header (ECMA-335 II.25.3.3), pointed to by the PE CLR runtime directory.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The fields of the CLI header needed to locate the metadata.
pub struct Cor20Header {
    /// Size of the header, always 72
    pub cb: u32,
    /// Minimum major runtime version required
    pub major_runtime_version: u16,
    /// Minor runtime version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata in bytes
    pub meta_data_size: u32,
    /// Runtime flags (`COMIMAGE_FLAGS_*`)
    pub flags: u32,
}

impl Cor20Header {
    /// Parses the header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and [`crate::Error::Malformed`]
    /// if the size field or the metadata directory is invalid.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        }

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags: parser.read_le::<u32>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let mut data = [0u8; 72];
        data[0] = 0x48;
        data[4] = 0x02;
        data[6] = 0x05;
        data[8..12].copy_from_slice(&0x2050_u32.to_le_bytes());
        data[12..16].copy_from_slice(&0x0800_u32.to_le_bytes());
        data[16] = 0x01;

        let header = Cor20Header::read(&data).unwrap();
        assert_eq!(header.cb, 72);
        assert_eq!(header.major_runtime_version, 2);
        assert_eq!(header.minor_runtime_version, 5);
        assert_eq!(header.meta_data_rva, 0x2050);
        assert_eq!(header.meta_data_size, 0x0800);
        assert_eq!(header.flags, 1);
    }

    #[test]
    fn invalid() {
        assert!(matches!(Cor20Header::read(&[0u8; 10]), Err(OutOfBounds)));

        let mut data = [0u8; 72];
        data[0] = 0x48;
        assert!(Cor20Header::read(&data).is_err());
    }
}
