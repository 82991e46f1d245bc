use strum::{EnumCount, EnumIter};

use crate::metadata::tables::CodedIndexType;

/// Identifiers of the metadata tables of the `#~` stream (ECMA-335 II.22).
///
/// The discriminant is the table number, i.e. the bit position in the valid vector and the high
/// byte of a token.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum TableId {
    /// `Module` - 0x00
    Module = 0x00,
    /// `TypeRef` - 0x01
    TypeRef = 0x01,
    /// `TypeDef` - 0x02
    TypeDef = 0x02,
    /// `FieldPtr` - 0x03, uncompressed streams only
    FieldPtr = 0x03,
    /// `Field` - 0x04
    Field = 0x04,
    /// `MethodPtr` - 0x05, uncompressed streams only
    MethodPtr = 0x05,
    /// `MethodDef` - 0x06
    MethodDef = 0x06,
    /// `ParamPtr` - 0x07, uncompressed streams only
    ParamPtr = 0x07,
    /// `Param` - 0x08
    Param = 0x08,
    /// `InterfaceImpl` - 0x09
    InterfaceImpl = 0x09,
    /// `MemberRef` - 0x0A
    MemberRef = 0x0A,
    /// `Constant` - 0x0B
    Constant = 0x0B,
    /// `CustomAttribute` - 0x0C
    CustomAttribute = 0x0C,
    /// `FieldMarshal` - 0x0D
    FieldMarshal = 0x0D,
    /// `DeclSecurity` - 0x0E
    DeclSecurity = 0x0E,
    /// `ClassLayout` - 0x0F
    ClassLayout = 0x0F,
    /// `FieldLayout` - 0x10
    FieldLayout = 0x10,
    /// `StandAloneSig` - 0x11
    StandAloneSig = 0x11,
    /// `EventMap` - 0x12
    EventMap = 0x12,
    /// `EventPtr` - 0x13, uncompressed streams only
    EventPtr = 0x13,
    /// `Event` - 0x14
    Event = 0x14,
    /// `PropertyMap` - 0x15
    PropertyMap = 0x15,
    /// `PropertyPtr` - 0x16, uncompressed streams only
    PropertyPtr = 0x16,
    /// `Property` - 0x17
    Property = 0x17,
    /// `MethodSemantics` - 0x18
    MethodSemantics = 0x18,
    /// `MethodImpl` - 0x19
    MethodImpl = 0x19,
    /// `ModuleRef` - 0x1A
    ModuleRef = 0x1A,
    /// `TypeSpec` - 0x1B
    TypeSpec = 0x1B,
    /// `ImplMap` - 0x1C
    ImplMap = 0x1C,
    /// `FieldRVA` - 0x1D
    FieldRVA = 0x1D,
    /// `EncLog` - 0x1E
    EncLog = 0x1E,
    /// `EncMap` - 0x1F
    EncMap = 0x1F,
    /// `Assembly` - 0x20
    Assembly = 0x20,
    /// `AssemblyProcessor` - 0x21
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` - 0x22
    AssemblyOS = 0x22,
    /// `AssemblyRef` - 0x23
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` - 0x24
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` - 0x25
    AssemblyRefOS = 0x25,
    /// `File` - 0x26
    File = 0x26,
    /// `ExportedType` - 0x27
    ExportedType = 0x27,
    /// `ManifestResource` - 0x28
    ManifestResource = 0x28,
    /// `NestedClass` - 0x29
    NestedClass = 0x29,
    /// `GenericParam` - 0x2A
    GenericParam = 0x2A,
    /// `MethodSpec` - 0x2B
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` - 0x2C
    GenericParamConstraint = 0x2C,
}

/// A single column of a metadata table row.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Column {
    /// A constant of the given width in bytes
    Fixed(u8),
    /// An index into `#Strings`
    Str,
    /// An index into `#GUID`
    Guid,
    /// An index into `#Blob`
    Blob,
    /// A simple index into another table
    Table(TableId),
    /// A coded index
    Coded(CodedIndexType),
}

impl TableId {
    /// The table with number `value`, if it is one this crate knows
    #[must_use]
    pub fn from_number(value: u8) -> Option<TableId> {
        use strum::IntoEnumIterator;

        TableId::iter().find(|id| *id as u8 == value)
    }

    /// The column layout of a row of this table (ECMA-335 II.22.2 - II.22.39).
    ///
    /// Row sizes depend on heap and table sizes, so the layout is needed to locate every table
    /// in the `#~` stream, including the ones whose rows are never decoded.
    #[must_use]
    pub fn columns(&self) -> &'static [Column] {
        use Column::{Blob, Coded, Fixed, Guid, Str, Table};
        use CodedIndexType as C;

        match self {
            TableId::Module => &[Fixed(2), Str, Guid, Guid, Guid],
            TableId::TypeRef => &[Coded(C::ResolutionScope), Str, Str],
            TableId::TypeDef => &[
                Fixed(4),
                Str,
                Str,
                Coded(C::TypeDefOrRef),
                Table(TableId::Field),
                Table(TableId::MethodDef),
            ],
            TableId::FieldPtr => &[Table(TableId::Field)],
            TableId::Field => &[Fixed(2), Str, Blob],
            TableId::MethodPtr => &[Table(TableId::MethodDef)],
            TableId::MethodDef => &[
                Fixed(4),
                Fixed(2),
                Fixed(2),
                Str,
                Blob,
                Table(TableId::Param),
            ],
            TableId::ParamPtr => &[Table(TableId::Param)],
            TableId::Param => &[Fixed(2), Fixed(2), Str],
            TableId::InterfaceImpl => &[Table(TableId::TypeDef), Coded(C::TypeDefOrRef)],
            TableId::MemberRef => &[Coded(C::MemberRefParent), Str, Blob],
            TableId::Constant => &[Fixed(2), Coded(C::HasConstant), Blob],
            TableId::CustomAttribute => &[
                Coded(C::HasCustomAttribute),
                Coded(C::CustomAttributeType),
                Blob,
            ],
            TableId::FieldMarshal => &[Coded(C::HasFieldMarshal), Blob],
            TableId::DeclSecurity => &[Fixed(2), Coded(C::HasDeclSecurity), Blob],
            TableId::ClassLayout => &[Fixed(2), Fixed(4), Table(TableId::TypeDef)],
            TableId::FieldLayout => &[Fixed(4), Table(TableId::Field)],
            TableId::StandAloneSig => &[Blob],
            TableId::EventMap => &[Table(TableId::TypeDef), Table(TableId::Event)],
            TableId::EventPtr => &[Table(TableId::Event)],
            TableId::Event => &[Fixed(2), Str, Coded(C::TypeDefOrRef)],
            TableId::PropertyMap => &[Table(TableId::TypeDef), Table(TableId::Property)],
            TableId::PropertyPtr => &[Table(TableId::Property)],
            TableId::Property => &[Fixed(2), Str, Blob],
            TableId::MethodSemantics => &[
                Fixed(2),
                Table(TableId::MethodDef),
                Coded(C::HasSemantics),
            ],
            TableId::MethodImpl => &[
                Table(TableId::TypeDef),
                Coded(C::MethodDefOrRef),
                Coded(C::MethodDefOrRef),
            ],
            TableId::ModuleRef => &[Str],
            TableId::TypeSpec => &[Blob],
            TableId::ImplMap => &[
                Fixed(2),
                Coded(C::MemberForwarded),
                Str,
                Table(TableId::ModuleRef),
            ],
            TableId::FieldRVA => &[Fixed(4), Table(TableId::Field)],
            TableId::EncLog => &[Fixed(4), Fixed(4)],
            TableId::EncMap => &[Fixed(4)],
            TableId::Assembly => &[
                Fixed(4),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(4),
                Blob,
                Str,
                Str,
            ],
            TableId::AssemblyProcessor => &[Fixed(4)],
            TableId::AssemblyOS => &[Fixed(4), Fixed(4), Fixed(4)],
            TableId::AssemblyRef => &[
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(2),
                Fixed(4),
                Blob,
                Str,
                Str,
                Blob,
            ],
            TableId::AssemblyRefProcessor => &[Fixed(4), Table(TableId::AssemblyRef)],
            TableId::AssemblyRefOS => &[
                Fixed(4),
                Fixed(4),
                Fixed(4),
                Table(TableId::AssemblyRef),
            ],
            TableId::File => &[Fixed(4), Str, Blob],
            TableId::ExportedType => &[Fixed(4), Fixed(4), Str, Str, Coded(C::Implementation)],
            TableId::ManifestResource => &[Fixed(4), Fixed(4), Str, Coded(C::Implementation)],
            TableId::NestedClass => &[Table(TableId::TypeDef), Table(TableId::TypeDef)],
            TableId::GenericParam => &[Fixed(2), Fixed(2), Coded(C::TypeOrMethodDef), Str],
            TableId::MethodSpec => &[Coded(C::MethodDefOrRef), Blob],
            TableId::GenericParamConstraint => &[
                Table(TableId::GenericParam),
                Coded(C::TypeDefOrRef),
            ],
        }
    }
}
