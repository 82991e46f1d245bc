use crate::{
    file::parser::Parser,
    metadata::{
        signatures::{
            SignatureArray, SignatureField, SignatureMethod, SignatureParameter,
            SignatureProperty, SignatureTypeSpec, TypeSignature, ELEMENT_TYPE,
        },
        token::Token,
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum nesting of types inside a single signature
const MAX_RECURSION_DEPTH: usize = 50;

const CALLING_CONVENTION_MASK: u8 = 0x0F;
const VARARG: u8 = 0x05;
const GENERIC: u8 = 0x10;
const HAS_THIS: u8 = 0x20;
const EXPLICIT_THIS: u8 = 0x40;
const FIELD: u8 = 0x06;
const PROPERTY: u8 = 0x08;

/// Decoder for the signature blobs of ECMA-335 II.23.2.
///
/// ```rust,no_run
/// use dotbrowse::metadata::signatures::SignatureParser;
/// let mut parser = SignatureParser::new(&[0x20, 0x01, 0x01, 0x0E]);
/// let sig = parser.parse_method_signature().unwrap();
/// assert_eq!(sig.params.len(), 1);
/// ```
///
/// A parser instance decodes exactly one signature.
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Creates a parser over a single signature blob
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let parsed = self.parse_type_inner();
        self.depth -= 1;
        parsed
    }

    fn parse_type_inner(&mut self) -> Result<TypeSignature> {
        let current_byte = self.parser.read_le::<u8>()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::PTR => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::Ptr(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(
                self.parser.read_compressed_token()?,
            )),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.parser.read_compressed_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let base = self.parse_type()?;
                let rank = self.parser.read_compressed_uint()?;

                let num_sizes = self.parser.read_compressed_uint()?;
                for _ in 0..num_sizes {
                    self.parser.read_compressed_uint()?;
                }

                let num_lo_bounds = self.parser.read_compressed_uint()?;
                for _ in 0..num_lo_bounds {
                    self.parser.read_compressed_int()?;
                }

                Ok(TypeSignature::Array(SignatureArray {
                    base: Box::new(base),
                    rank,
                }))
            }
            ELEMENT_TYPE::SZARRAY => {
                self.parse_custom_mods()?;
                Ok(TypeSignature::SzArray(Box::new(self.parse_type()?)))
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.parser.peek_byte()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.parse_type()?;
                let arg_count = self.parser.read_compressed_uint()?;

                let mut type_args = Vec::with_capacity(arg_count.min(64) as usize);
                for _ in 0..arg_count {
                    type_args.push(self.parse_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::FNPTR => Ok(TypeSignature::FnPtr(Box::new(
                self.parse_method_signature()?,
            ))),
            // A modifier only annotates the type that follows it
            ELEMENT_TYPE::CMOD_REQD | ELEMENT_TYPE::CMOD_OPT => {
                self.parser.read_compressed_token()?;
                self.parse_type_inner()
            }
            ELEMENT_TYPE::PINNED => Ok(TypeSignature::Pinned(Box::new(self.parse_type()?))),
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    fn parse_custom_mods(&mut self) -> Result<Vec<Token>> {
        let mut mods = Vec::new();

        while self.parser.has_more_data() {
            let next_byte = self.parser.peek_byte()?;
            if next_byte != ELEMENT_TYPE::CMOD_OPT && next_byte != ELEMENT_TYPE::CMOD_REQD {
                break;
            }

            self.parser.advance()?;
            mods.push(self.parser.read_compressed_token()?);
        }

        Ok(mods)
    }

    fn parse_param(&mut self) -> Result<SignatureParameter> {
        let modifiers = self.parse_custom_mods()?;

        let mut by_ref = false;
        if self.parser.peek_byte()? == ELEMENT_TYPE::BYREF {
            self.parser.advance()?;
            by_ref = true;
        }

        Ok(SignatureParameter {
            modifiers,
            by_ref,
            base: self.parse_type()?,
        })
    }

    /// Parses a `MethodDefSig`, `MethodRefSig` or `StandAloneMethodSig`.
    ///
    /// For vararg call sites only the parameters before the sentinel are kept.
    ///
    /// # Errors
    /// Returns an error if the signature is truncated, malformed or nested too deeply.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let convention_byte = self.parser.read_le::<u8>()?;

        let param_count_generic = if convention_byte & GENERIC != 0 {
            self.parser.read_compressed_uint()?
        } else {
            0
        };
        let param_count = self.parser.read_compressed_uint()?;

        let mut method = SignatureMethod {
            has_this: convention_byte & HAS_THIS != 0,
            explicit_this: convention_byte & EXPLICIT_THIS != 0,
            vararg: convention_byte & CALLING_CONVENTION_MASK == VARARG,
            param_count_generic,
            return_type: self.parse_param()?,
            params: Vec::with_capacity(param_count.min(64) as usize),
        };

        for _ in 0..param_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                break;
            }

            method.params.push(self.parse_param()?);
        }

        Ok(method)
    }

    /// Parses a `FieldSig`.
    ///
    /// # Errors
    /// Returns an error if the header byte is not `FIELD` or the type can't be parsed.
    pub fn parse_field_signature(&mut self) -> Result<SignatureField> {
        let head_byte = self.parser.read_le::<u8>()?;
        if head_byte != FIELD {
            return Err(malformed_error!(
                "SignatureField - invalid start - {}",
                head_byte
            ));
        }

        let modifiers = self.parse_custom_mods()?;
        let base = self.parse_type()?;

        Ok(SignatureField { modifiers, base })
    }

    /// Parses a `PropertySig`.
    ///
    /// # Errors
    /// Returns an error if the header byte lacks `PROPERTY` or the types can't be parsed.
    pub fn parse_property_signature(&mut self) -> Result<SignatureProperty> {
        let head_byte = self.parser.read_le::<u8>()?;
        if head_byte & PROPERTY == 0 {
            return Err(malformed_error!(
                "SignatureProperty - invalid start - {}",
                head_byte
            ));
        }

        let param_count = self.parser.read_compressed_uint()?;
        let modifiers = self.parse_custom_mods()?;
        let base = self.parse_type()?;

        let mut params = Vec::with_capacity(param_count.min(64) as usize);
        for _ in 0..param_count {
            params.push(self.parse_param()?);
        }

        Ok(SignatureProperty {
            has_this: head_byte & HAS_THIS != 0,
            modifiers,
            base,
            params,
        })
    }

    /// Parses a `TypeSpec` blob.
    ///
    /// # Errors
    /// Returns an error if the type can't be parsed.
    pub fn parse_type_spec_signature(&mut self) -> Result<SignatureTypeSpec> {
        Ok(SignatureTypeSpec {
            base: self.parse_type()?,
        })
    }
}
