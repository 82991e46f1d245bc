use crate::metadata::token::Token;

#[allow(non_snake_case, missing_docs)]
/// Element type bytes of signature blobs (ECMA-335 II.23.1.16)
pub mod ELEMENT_TYPE {
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Followed by type
    pub const PTR: u8 = 0x0f;
    // Followed by type
    pub const BYREF: u8 = 0x10;
    // Followed by TypeDefOrRefOrSpecEncoded
    pub const VALUETYPE: u8 = 0x11;
    // Followed by TypeDefOrRefOrSpecEncoded
    pub const CLASS: u8 = 0x12;
    // Generic parameter of the declaring type, by number
    pub const VAR: u8 = 0x13;
    // type rank num_sizes size* num_lo_bounds lo_bound*
    pub const ARRAY: u8 = 0x14;
    // type arg_count type*
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // Followed by a full method signature
    pub const FNPTR: u8 = 0x1b;
    pub const OBJECT: u8 = 0x1c;
    // Single dimension array with lower bound 0
    pub const SZARRAY: u8 = 0x1d;
    // Generic parameter of the method, by number
    pub const MVAR: u8 = 0x1e;
    pub const CMOD_REQD: u8 = 0x1f;
    pub const CMOD_OPT: u8 = 0x20;
    pub const INTERNAL: u8 = 0x21;
    pub const SENTINEL: u8 = 0x41;
    pub const PINNED: u8 = 0x45;
}

/// A type as it appears inside a signature blob.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSignature {
    #[default]
    /// Not defined
    Unknown,
    /// `System.Void`
    Void,
    /// `System.Boolean`
    Boolean,
    /// `System.Char`
    Char,
    /// `System.SByte`
    I1,
    /// `System.Byte`
    U1,
    /// `System.Int16`
    I2,
    /// `System.UInt16`
    U2,
    /// `System.Int32`
    I4,
    /// `System.UInt32`
    U4,
    /// `System.Int64`
    I8,
    /// `System.UInt64`
    U8,
    /// `System.Single`
    R4,
    /// `System.Double`
    R8,
    /// `System.String`
    String,
    /// `System.Object`
    Object,
    /// `System.IntPtr`
    I,
    /// `System.UIntPtr`
    U,
    /// `System.TypedReference`
    TypedByRef,
    /// Unmanaged pointer to a type
    Ptr(Box<TypeSignature>),
    /// Managed reference to a type
    ByRef(Box<TypeSignature>),
    /// A value type, `TypeDef`, `TypeRef` or `TypeSpec` token
    ValueType(Token),
    /// A reference type, `TypeDef`, `TypeRef` or `TypeSpec` token
    Class(Token),
    /// Generic parameter of the enclosing type, by position
    GenericParamType(u32),
    /// Generic parameter of the enclosing method, by position
    GenericParamMethod(u32),
    /// General array
    Array(SignatureArray),
    /// Single dimension, zero based array
    SzArray(Box<TypeSignature>),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
    /// A pinned local
    Pinned(Box<TypeSignature>),
}

/// A general array (II.23.2.13).
///
/// Sizes and lower bounds are validated while parsing but not kept; only the rank is shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureArray {
    /// The element type
    pub base: Box<TypeSignature>,
    /// The number of dimensions
    pub rank: u32,
}

/// A parameter or return type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureParameter {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// Passed by reference
    pub by_ref: bool,
    /// The type
    pub base: TypeSignature,
}

/// Method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureMethod {
    /// Instance method, `this` is passed implicitly
    pub has_this: bool,
    /// `this` is the first explicit parameter
    pub explicit_this: bool,
    /// Variable argument calling convention
    pub vararg: bool,
    /// Number of generic parameters of the method
    pub param_count_generic: u32,
    /// The return type
    pub return_type: SignatureParameter,
    /// The fixed parameters
    pub params: Vec<SignatureParameter>,
}

/// Field signature (II.23.2.4)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureField {
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The field type
    pub base: TypeSignature,
}

/// Property signature (II.23.2.5)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// Custom modifiers - `TypeDefOrRefOrSpecEncoded`
    pub modifiers: Vec<Token>,
    /// The property type
    pub base: TypeSignature,
    /// Index parameters
    pub params: Vec<SignatureParameter>,
}

/// Type specification signature (II.23.2.14)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureTypeSpec {
    /// The specified type
    pub base: TypeSignature,
}
