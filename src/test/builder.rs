//! Builds metadata images row by row.
//!
//! All heaps and tables stay small, so every heap index, table index and coded index is
//! written with two bytes.

use std::collections::HashMap;

use crate::metadata::tables::{CodedIndexType, TableId};

/// Table count of the `#~` schema
const TABLE_SLOTS: usize = TableId::GenericParamConstraint as usize + 1;

/// Compressed unsigned integer (ECMA-335 II.23.2)
pub fn compressed(value: u32) -> Vec<u8> {
    if value < 0x80 {
        vec![value as u8]
    } else if value < 0x4000 {
        vec![0x80 | (value >> 8) as u8, value as u8]
    } else {
        vec![
            0xC0 | (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]
    }
}

/// Encodes a reference to `row` of `table` as a coded index of `kind`
pub fn coded(kind: CodedIndexType, table: TableId, row: u32) -> u16 {
    let tag = match (kind, table) {
        (CodedIndexType::CustomAttributeType, TableId::MethodDef) => 2,
        (CodedIndexType::CustomAttributeType, TableId::MemberRef) => 3,
        _ => kind
            .tables()
            .iter()
            .position(|candidate| *candidate == table)
            .expect("table is not part of the coded index") as u32,
    };

    ((row << kind.tag_bits()) | tag) as u16
}

/// A `TypeDefOrRef` element as it appears inside a signature blob
pub fn type_def_or_ref(table: TableId, row: u32) -> Vec<u8> {
    compressed(u32::from(coded(CodedIndexType::TypeDefOrRef, table, row)))
}

/// `MethodDefSig`: calling convention, parameter count, return type and parameters
pub fn method_sig(convention: u8, return_type: &[u8], params: &[&[u8]]) -> Vec<u8> {
    let mut sig = vec![convention];
    sig.extend(compressed(params.len() as u32));
    sig.extend_from_slice(return_type);
    for param in params {
        sig.extend_from_slice(param);
    }
    sig
}

/// Row-by-row writer of the `#~`, `#Strings` and `#Blob` streams of a module
pub struct MetadataBuilder {
    strings: Vec<u8>,
    string_offsets: HashMap<String, u16>,
    blobs: Vec<u8>,
    tables: Vec<Vec<Vec<u8>>>,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        MetadataBuilder {
            strings: vec![0],
            string_offsets: HashMap::new(),
            blobs: vec![0],
            tables: vec![Vec::new(); TABLE_SLOTS],
        }
    }
}

struct Row(Vec<u8>);

impl Row {
    fn new() -> Self {
        Row(Vec::new())
    }

    fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of `value` in `#Strings`, added on first use
    pub fn string(&mut self, value: &str) -> u16 {
        if value.is_empty() {
            return 0;
        }

        if let Some(offset) = self.string_offsets.get(value) {
            return *offset;
        }

        let offset = self.strings.len() as u16;
        self.strings.extend_from_slice(value.as_bytes());
        self.strings.push(0);
        self.string_offsets.insert(value.to_string(), offset);
        offset
    }

    /// Offset of a new `#Blob` entry holding `value`
    pub fn blob(&mut self, value: &[u8]) -> u16 {
        let offset = self.blobs.len() as u16;
        self.blobs.extend(compressed(value.len() as u32));
        self.blobs.extend_from_slice(value);
        offset
    }

    fn push(&mut self, table: TableId, row: Row) -> u32 {
        let rows = &mut self.tables[table as usize];
        rows.push(row.0);
        rows.len() as u32
    }

    pub fn type_ref(&mut self, scope: u16, namespace: &str, name: &str) -> u32 {
        let row = Row::new()
            .u16(scope)
            .u16(self.string(name))
            .u16(self.string(namespace));
        self.push(TableId::TypeRef, row)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn type_def(
        &mut self,
        flags: u32,
        namespace: &str,
        name: &str,
        extends: u16,
        field_list: u16,
        method_list: u16,
    ) -> u32 {
        let row = Row::new()
            .u32(flags)
            .u16(self.string(name))
            .u16(self.string(namespace))
            .u16(extends)
            .u16(field_list)
            .u16(method_list);
        self.push(TableId::TypeDef, row)
    }

    pub fn field(&mut self, flags: u16, name: &str, signature: &[u8]) -> u32 {
        let row = Row::new()
            .u16(flags)
            .u16(self.string(name))
            .u16(self.blob(signature));
        self.push(TableId::Field, row)
    }

    pub fn method(&mut self, flags: u16, name: &str, signature: &[u8], param_list: u16) -> u32 {
        let row = Row::new()
            .u32(0)
            .u16(0)
            .u16(flags)
            .u16(self.string(name))
            .u16(self.blob(signature))
            .u16(param_list);
        self.push(TableId::MethodDef, row)
    }

    pub fn param(&mut self, sequence: u16, name: &str) -> u32 {
        let row = Row::new().u16(0).u16(sequence).u16(self.string(name));
        self.push(TableId::Param, row)
    }

    pub fn interface_impl(&mut self, class: u16, interface: u16) -> u32 {
        let row = Row::new().u16(class).u16(interface);
        self.push(TableId::InterfaceImpl, row)
    }

    pub fn member_ref(&mut self, class: u16, name: &str, signature: &[u8]) -> u32 {
        let row = Row::new()
            .u16(class)
            .u16(self.string(name))
            .u16(self.blob(signature));
        self.push(TableId::MemberRef, row)
    }

    pub fn custom_attribute(&mut self, parent: u16, constructor: u16, value: &[u8]) -> u32 {
        let row = Row::new()
            .u16(parent)
            .u16(constructor)
            .u16(self.blob(value));
        self.push(TableId::CustomAttribute, row)
    }

    pub fn property_map(&mut self, parent: u16, property_list: u16) -> u32 {
        let row = Row::new().u16(parent).u16(property_list);
        self.push(TableId::PropertyMap, row)
    }

    pub fn property(&mut self, name: &str, signature: &[u8]) -> u32 {
        let row = Row::new()
            .u16(0)
            .u16(self.string(name))
            .u16(self.blob(signature));
        self.push(TableId::Property, row)
    }

    pub fn method_semantics(&mut self, semantics: u16, method: u16, association: u16) -> u32 {
        let row = Row::new().u16(semantics).u16(method).u16(association);
        self.push(TableId::MethodSemantics, row)
    }

    pub fn type_spec(&mut self, signature: &[u8]) -> u32 {
        let row = Row::new().u16(self.blob(signature));
        self.push(TableId::TypeSpec, row)
    }

    pub fn nested_class(&mut self, nested: u16, enclosing: u16) -> u32 {
        let row = Row::new().u16(nested).u16(enclosing);
        self.push(TableId::NestedClass, row)
    }

    pub fn generic_param(&mut self, number: u16, flags: u16, owner: u16, name: &str) -> u32 {
        let row = Row::new()
            .u16(number)
            .u16(flags)
            .u16(owner)
            .u16(self.string(name));
        self.push(TableId::GenericParam, row)
    }

    pub fn generic_param_constraint(&mut self, owner: u16, constraint: u16) -> u32 {
        let row = Row::new().u16(owner).u16(constraint);
        self.push(TableId::GenericParamConstraint, row)
    }

    /// The `#~` stream
    pub fn tables_stream(&self) -> Vec<u8> {
        let mut valid = 0u64;
        for (table, rows) in self.tables.iter().enumerate() {
            if !rows.is_empty() {
                valid |= 1 << table;
            }
        }

        let mut stream = vec![0, 0, 0, 0, 2, 0, 0, 1];
        stream.extend_from_slice(&valid.to_le_bytes());
        stream.extend_from_slice(&0u64.to_le_bytes());
        for rows in self.tables.iter().filter(|rows| !rows.is_empty()) {
            stream.extend_from_slice(&(rows.len() as u32).to_le_bytes());
        }
        for rows in &self.tables {
            for row in rows {
                stream.extend_from_slice(row);
            }
        }
        stream
    }

    /// A complete metadata root with the `#~`, `#Strings` and `#Blob` streams
    pub fn build(&self) -> Vec<u8> {
        let mut streams: Vec<(&str, Vec<u8>)> = vec![
            ("#~", self.tables_stream()),
            ("#Strings", self.strings.clone()),
            ("#Blob", self.blobs.clone()),
        ];
        for (_, data) in &mut streams {
            while data.len() % 4 != 0 {
                data.push(0);
            }
        }

        let version = b"v4.0.30319\0\0";
        let directory_size: usize = streams
            .iter()
            .map(|(name, _)| 8 + ((name.len() + 1 + 3) & !3))
            .sum();
        let header_size = 16 + version.len() + 4 + directory_size;

        let mut root = Vec::new();
        root.extend_from_slice(&0x424A_5342u32.to_le_bytes());
        root.extend_from_slice(&1u16.to_le_bytes());
        root.extend_from_slice(&1u16.to_le_bytes());
        root.extend_from_slice(&0u32.to_le_bytes());
        root.extend_from_slice(&(version.len() as u32).to_le_bytes());
        root.extend_from_slice(version);
        root.extend_from_slice(&0u16.to_le_bytes());
        root.extend_from_slice(&(streams.len() as u16).to_le_bytes());

        let mut offset = header_size;
        for (name, data) in &streams {
            root.extend_from_slice(&(offset as u32).to_le_bytes());
            root.extend_from_slice(&(data.len() as u32).to_le_bytes());
            let mut padded = name.as_bytes().to_vec();
            padded.push(0);
            while padded.len() % 4 != 0 {
                padded.push(0);
            }
            root.extend_from_slice(&padded);
            offset += data.len();
        }

        for (_, data) in &streams {
            root.extend_from_slice(data);
        }
        root
    }
}

/// Wraps a metadata root into a minimal PE32 image with a single `.text` section holding the
/// CLI header followed by the metadata
pub fn pe_image(metadata: &[u8]) -> Vec<u8> {
    const PE_OFFSET: usize = 0x80;
    const SECTION_OFFSET: usize = 0x200;
    const SECTION_RVA: u32 = 0x2000;
    const CLI_HEADER_SIZE: u32 = 72;

    let content_size = CLI_HEADER_SIZE as usize + metadata.len();
    let raw_size = (content_size + 0x1FF) & !0x1FF;

    let mut image = vec![0u8; SECTION_OFFSET + raw_size];
    let mut put = |offset: usize, bytes: &[u8]| {
        image[offset..offset + bytes.len()].copy_from_slice(bytes);
    };

    // DOS header
    put(0, b"MZ");
    put(0x3C, &(PE_OFFSET as u32).to_le_bytes());

    // COFF header: i386, one section, PE32 optional header, executable DLL
    put(PE_OFFSET, b"PE\0\0");
    let coff = PE_OFFSET + 4;
    put(coff, &0x014Cu16.to_le_bytes());
    put(coff + 2, &1u16.to_le_bytes());
    put(coff + 16, &224u16.to_le_bytes());
    put(coff + 18, &0x2102u16.to_le_bytes());

    let optional = coff + 20;
    put(optional, &0x010Bu16.to_le_bytes());
    put(optional + 4, &(raw_size as u32).to_le_bytes());
    put(optional + 20, &SECTION_RVA.to_le_bytes());
    put(optional + 28, &0x0040_0000u32.to_le_bytes());
    put(optional + 32, &0x2000u32.to_le_bytes());
    put(optional + 36, &0x0200u32.to_le_bytes());
    put(optional + 40, &4u16.to_le_bytes());
    put(optional + 48, &4u16.to_le_bytes());
    let image_size = SECTION_RVA + ((raw_size as u32 + 0x1FFF) & !0x1FFF);
    put(optional + 56, &image_size.to_le_bytes());
    put(optional + 60, &(SECTION_OFFSET as u32).to_le_bytes());
    put(optional + 68, &3u16.to_le_bytes());
    put(optional + 70, &0x8540u16.to_le_bytes());
    put(optional + 72, &0x0010_0000u32.to_le_bytes());
    put(optional + 76, &0x1000u32.to_le_bytes());
    put(optional + 80, &0x0010_0000u32.to_le_bytes());
    put(optional + 84, &0x1000u32.to_le_bytes());
    put(optional + 92, &16u32.to_le_bytes());

    // Data directory 14, the CLI header
    let clr_directory = optional + 96 + 14 * 8;
    put(clr_directory, &SECTION_RVA.to_le_bytes());
    put(clr_directory + 4, &CLI_HEADER_SIZE.to_le_bytes());

    let section = optional + 224;
    put(section, b".text\0\0\0");
    put(section + 8, &(content_size as u32).to_le_bytes());
    put(section + 12, &SECTION_RVA.to_le_bytes());
    put(section + 16, &(raw_size as u32).to_le_bytes());
    put(section + 20, &(SECTION_OFFSET as u32).to_le_bytes());
    put(section + 36, &0x6000_0020u32.to_le_bytes());

    // CLI header: runtime 2.5, metadata directly behind the header, IL only
    let cli = SECTION_OFFSET;
    put(cli, &CLI_HEADER_SIZE.to_le_bytes());
    put(cli + 4, &2u16.to_le_bytes());
    put(cli + 6, &5u16.to_le_bytes());
    put(cli + 8, &(SECTION_RVA + CLI_HEADER_SIZE).to_le_bytes());
    put(cli + 12, &(metadata.len() as u32).to_le_bytes());
    put(cli + 16, &1u32.to_le_bytes());

    put(cli + CLI_HEADER_SIZE as usize, metadata);
    image
}
