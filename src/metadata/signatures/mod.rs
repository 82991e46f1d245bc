//! Signature blobs (ECMA-335 II.23.2).
//!
//! Fields, methods, properties and type specifications describe their types in a compact
//! binary encoding stored in the `#Blob` heap. The functions here decode those blobs into
//! [`TypeSignature`] trees; resolving the tokens they contain is up to the caller.
//!
//! ```rust,no_run
//! use dotbrowse::metadata::signatures::parse_method_signature;
//!
//! // instance string M(int32)
//! let method = parse_method_signature(&[0x20, 0x01, 0x0E, 0x08])?;
//! assert_eq!(method.params.len(), 1);
//! # Ok::<(), dotbrowse::Error>(())
//! ```

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// Parses a `MethodDefSig` or `MethodRefSig`.
///
/// # Errors
/// Returns an error if the signature is truncated, malformed or nested too deeply.
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    let mut parser = SignatureParser::new(data);
    parser.parse_method_signature()
}

/// Parses a `FieldSig`.
///
/// # Errors
/// Returns an error if the signature is truncated, malformed or nested too deeply.
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    let mut parser = SignatureParser::new(data);
    parser.parse_field_signature()
}

/// Parses a `PropertySig`.
///
/// # Errors
/// Returns an error if the signature is truncated, malformed or nested too deeply.
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    let mut parser = SignatureParser::new(data);
    parser.parse_property_signature()
}

/// Parses a `TypeSpec` blob.
///
/// # Errors
/// Returns an error if the signature is truncated, malformed or nested too deeply.
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    let mut parser = SignatureParser::new(data);
    parser.parse_type_spec_signature()
}
