//! PE container access.
//!
//! A .NET module is a PE image whose CLR runtime header directory points at the metadata.
//! [`File`] owns the raw bytes through a [`Backend`] (memory-mapped from disk, or an owned
//! buffer) together with the `goblin` view parsed over them, and translates RVAs into file
//! offsets so the metadata layers can slice the bytes they need.

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr, NotSupported, OutOfBounds},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Storage for the raw bytes of a loaded file.
pub trait Backend: Send + Sync {
    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let data = self.data();
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > data.len() {
            return Err(OutOfBounds);
        }

        Ok(&data[offset..offset_end])
    }

    /// The complete data
    fn data(&self) -> &[u8];

    /// Length of the data in bytes
    fn len(&self) -> usize;
}

/// A parsed PE image carrying a CLR runtime header.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-maps and parses the file at `file`.
    ///
    /// # Errors
    /// Fails if the file can't be opened or is not a .NET PE image.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Parses an in-memory PE image.
    ///
    /// # Errors
    /// Fails if the data is empty or not a .NET PE image.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| match PE::parse(data.data()) {
            Ok(pe) => match pe.header.optional_header {
                Some(optional_header) => {
                    if optional_header
                        .data_directories
                        .get_clr_runtime_header()
                        .is_none()
                    {
                        Err(NotSupported)
                    } else {
                        Ok(pe)
                    }
                }
                None => Err(malformed_error!("File does not have an OptionalHeader")),
            },
            Err(error) => Err(GoblinErr(error)),
        })
    }

    /// RVA and size of the CLR runtime header.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if the directory is missing, which `load` already
    /// rules out.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let clr_dir = pe
                .header
                .optional_header
                .as_ref()
                .and_then(|optional_header| {
                    optional_header
                        .data_directories
                        .get_clr_runtime_header()
                })
                .ok_or(NotSupported)?;

            Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
        })
    }

    /// Returns `len` bytes starting at file offset `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the file.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translates a relative virtual address into a file offset using the section table.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 = u32::try_from(rva)
            .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}
