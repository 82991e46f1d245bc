//! A [`MetadataProvider`] backed by a compiled .NET module.
//!
//! [`CilModule`] reads the PE image, locates the metadata through the CLI header and builds the
//! owned model once. The image itself is released after loading; the module holds no borrowed
//! data and is `Send + Sync`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotbrowse::{CilModule, MetadataProvider};
//! use std::path::Path;
//!
//! let module = CilModule::from_file(Path::new("Library.dll"))?;
//! println!("runtime {}", module.runtime_version());
//! for ty in module.types() {
//!     println!("{} ({} members)", ty.key(), module.members(ty).len());
//! }
//! # Ok::<(), dotbrowse::Error>(())
//! ```

mod loader;

use std::{collections::HashMap, path::Path};

use log::debug;

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, Strings, TableSummary, TablesHeader},
        token::Token,
    },
    model::{Member, TypeDefinition, TypeKey, TypeReference},
    provider::MetadataProvider,
    Result,
};

use loader::ModuleLoader;

/// Empty `#Blob` heap for modules that carry no blobs
const EMPTY_HEAP: &[u8] = &[0];

/// The declarations of one loaded .NET module.
#[derive(Debug, Clone)]
pub struct CilModule {
    types: Vec<TypeDefinition>,
    members: Vec<Vec<Member>>,
    by_token: HashMap<Token, usize>,
    by_key: HashMap<TypeKey, usize>,
    runtime_version: String,
    tables: Vec<TableSummary>,
}

impl CilModule {
    /// Loads the module at `path`.
    ///
    /// # Errors
    /// Fails if the file can't be read, is not a PE image with a CLI header, or its metadata is
    /// malformed.
    pub fn from_file(path: &Path) -> Result<CilModule> {
        let file = File::from_file(path)?;

        Self::from_pe(&file)
    }

    /// Loads a module from the bytes of a PE image.
    ///
    /// # Errors
    /// Fails if `data` is empty, not a PE image with a CLI header, or its metadata is malformed.
    pub fn from_mem(data: Vec<u8>) -> Result<CilModule> {
        let file = File::from_mem(data)?;

        Self::from_pe(&file)
    }

    /// Loads a module from a bare metadata root (`BSJB`), without the surrounding PE image.
    ///
    /// # Errors
    /// Fails if the root, the table stream or any heap index, token or signature is malformed.
    pub fn from_metadata(data: &[u8]) -> Result<CilModule> {
        let root = Root::read(data)?;

        let tables_data = root
            .stream(data, "#~")
            .or_else(|| root.stream(data, "#-"))
            .ok_or_else(|| malformed_error!("Metadata has no table stream"))?;
        let strings_data = root
            .stream(data, "#Strings")
            .ok_or_else(|| malformed_error!("Metadata has no #Strings heap"))?;
        let blob_data = root.stream(data, "#Blob").unwrap_or(EMPTY_HEAP);

        let tables = TablesHeader::from(tables_data)?;
        let strings = Strings::from(strings_data)?;
        let blobs = Blob::from(blob_data)?;

        debug!(
            "Metadata version {} with {} tables",
            root.version,
            tables.table_count()
        );

        let model = ModuleLoader::new(&tables, strings, blobs)?.load()?;

        let mut by_token = HashMap::with_capacity(model.types.len());
        let mut by_key = HashMap::with_capacity(model.types.len());
        for (index, ty) in model.types.iter().enumerate() {
            by_token.insert(ty.token, index);
            by_key.entry(ty.key()).or_insert(index);
        }

        debug!("Loaded {} types", model.types.len());

        Ok(CilModule {
            types: model.types,
            members: model.members,
            by_token,
            by_key,
            runtime_version: root.version.trim_end_matches('\0').to_string(),
            tables: tables.table_summary(),
        })
    }

    fn from_pe(file: &File) -> Result<CilModule> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

        let metadata_offset = file.rva_to_offset(header.meta_data_rva as usize)?;

        Self::from_metadata(file.data_slice(metadata_offset, header.meta_data_size as usize)?)
    }

    /// Runtime version the module was built against, e.g. `v4.0.30319`
    #[must_use]
    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    /// Row counts of the metadata tables present in the module
    #[must_use]
    pub fn tables(&self) -> &[TableSummary] {
        &self.tables
    }

    /// Looks up a type by its `TypeDef` token
    #[must_use]
    pub fn type_by_token(&self, token: Token) -> Option<&TypeDefinition> {
        self.by_token
            .get(&token)
            .and_then(|index| self.types.get(*index))
    }
}

impl MetadataProvider for CilModule {
    fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    fn members(&self, ty: &TypeDefinition) -> &[Member] {
        self.by_token
            .get(&ty.token)
            .and_then(|index| self.members.get(*index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn resolve(&self, reference: &TypeReference) -> Option<&TypeDefinition> {
        self.by_key
            .get(&reference.key())
            .and_then(|index| self.types.get(*index))
    }
}
