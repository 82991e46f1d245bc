//! Construction of the owned model from the raw metadata tables.
//!
//! The loader reads every table it needs once, indexes the relations between them (nesting,
//! generic parameters, interfaces, property maps, accessors, extension markers) and then walks
//! the `TypeDef` table in order. All heap indexes, tokens and signatures are validated on the
//! way; the first inconsistency aborts the load.

use std::{
    collections::{HashMap, HashSet},
    ops::Range,
};

use log::{debug, trace};

use crate::{
    metadata::{
        signatures::{
            parse_field_signature, parse_method_signature, parse_property_signature,
            parse_type_spec_signature, SignatureParameter, TypeSignature,
        },
        streams::{Blob, Strings, TablesHeader},
        tables::{
            CodedIndex, CustomAttributeRaw, FieldRaw, GenericParamConstraintRaw, GenericParamRaw,
            InterfaceImplRaw, MemberRefRaw, MethodDefRaw, MethodSemanticsAttributes,
            MethodSemanticsRaw, NestedClassRaw, ParamRaw, PropertyMapRaw, PropertyRaw,
            RowReadable, TableId, TypeDefRaw, TypeRefRaw, TypeSpecRaw,
        },
        token::Token,
    },
    model::{
        FieldDefinition, FieldModifiers, GenericParamFlags, GenericParameter, Member,
        MemberAccessFlags, MethodDefinition, MethodModifiers, Parameter, PropertyDefinition,
        TypeDefinition, TypeModifiers, TypeReference, TypeVisibility,
    },
    Error::{RecursionLimit, TypeNotFound},
    Result,
};

/// Limit for nesting chains and `TypeSpec` indirections
const MAX_NESTING_DEPTH: usize = 64;

const EXTENSION_ATTRIBUTE_NAMESPACE: &str = "System.Runtime.CompilerServices";
const EXTENSION_ATTRIBUTE_NAME: &str = "ExtensionAttribute";
const MODULE_TYPE_NAME: &str = "<Module>";

/// Declarations read from a module, in `TypeDef` order
pub(crate) struct LoadedModel {
    pub types: Vec<TypeDefinition>,
    pub members: Vec<Vec<Member>>,
}

/// Namespace, enclosing path and name of a `TypeDef` or `TypeRef`
struct QualifiedName {
    namespace: Option<String>,
    declaring_type: Option<String>,
    name: String,
}

impl QualifiedName {
    fn into_reference(self) -> TypeReference {
        TypeReference::Named {
            namespace: self.namespace,
            name: self.name,
            declaring_type: self.declaring_type,
            generic_arguments: Vec::new(),
        }
    }

    fn is(&self, namespace: &str, name: &str) -> bool {
        self.declaring_type.is_none()
            && self.namespace.as_deref() == Some(namespace)
            && self.name == name
    }
}

/// Names that `VAR` and `MVAR` signature elements refer to by position
#[derive(Clone, Copy, Default)]
struct GenericContext<'c> {
    type_parameters: &'c [String],
    method_parameters: &'c [String],
}

impl GenericContext<'_> {
    fn type_parameter(&self, number: u32) -> TypeReference {
        match self.type_parameters.get(number as usize) {
            Some(name) => TypeReference::GenericParameter(name.clone()),
            None => TypeReference::GenericParameter(format!("!{number}")),
        }
    }

    fn method_parameter(&self, number: u32) -> TypeReference {
        match self.method_parameters.get(number as usize) {
            Some(name) => TypeReference::GenericParameter(name.clone()),
            None => TypeReference::GenericParameter(format!("!!{number}")),
        }
    }
}

#[derive(Clone, Copy, Default)]
struct Accessors {
    getter: Option<u32>,
    setter: Option<u32>,
}

fn read_rows<T: RowReadable>(tables: &TablesHeader<'_>) -> Result<Vec<T>> {
    match tables.table::<T>() {
        Some(table) => table.iter().collect(),
        None => Ok(Vec::new()),
    }
}

fn row<T>(rows: &[T], table: TableId, rid: u32) -> Result<&T> {
    rid.checked_sub(1)
        .and_then(|index| rows.get(index as usize))
        .ok_or(TypeNotFound(Token::from_parts(table as u8, rid)))
}

/// The rows `start..` up to the start of the next owner, clamped to the table
fn owned_range(start: u32, next_start: Option<u32>, row_count: usize) -> Range<u32> {
    let limit = u32::try_from(row_count).unwrap_or(u32::MAX).saturating_add(1);
    let start = start.clamp(1, limit);
    let end = next_start.unwrap_or(limit).clamp(start, limit);
    start..end
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) struct ModuleLoader<'a> {
    strings: Strings<'a>,
    blobs: Blob<'a>,
    typedefs: Vec<TypeDefRaw>,
    typerefs: Vec<TypeRefRaw>,
    typespecs: Vec<TypeSpecRaw>,
    fields: Vec<FieldRaw>,
    methods: Vec<MethodDefRaw>,
    params: Vec<ParamRaw>,
    properties: Vec<PropertyRaw>,
    memberrefs: Vec<MemberRefRaw>,
    enclosing: HashMap<u32, u32>,
    generic_params: HashMap<Token, Vec<GenericParamRaw>>,
    constraints: HashMap<u32, Vec<CodedIndex>>,
    interfaces: HashMap<u32, Vec<CodedIndex>>,
    property_ranges: HashMap<u32, Range<u32>>,
    accessors: HashMap<u32, Accessors>,
    method_owners: Vec<u32>,
    extensions: HashSet<u32>,
}

impl<'a> ModuleLoader<'a> {
    /// Reads and indexes every table the model is built from.
    pub(crate) fn new(
        tables: &TablesHeader<'a>,
        strings: Strings<'a>,
        blobs: Blob<'a>,
    ) -> Result<Self> {
        let mut loader = ModuleLoader {
            strings,
            blobs,
            typedefs: read_rows(tables)?,
            typerefs: read_rows(tables)?,
            typespecs: read_rows(tables)?,
            fields: read_rows(tables)?,
            methods: read_rows(tables)?,
            params: read_rows(tables)?,
            properties: read_rows(tables)?,
            memberrefs: read_rows(tables)?,
            enclosing: HashMap::new(),
            generic_params: HashMap::new(),
            constraints: HashMap::new(),
            interfaces: HashMap::new(),
            property_ranges: HashMap::new(),
            accessors: HashMap::new(),
            method_owners: Vec::new(),
            extensions: HashSet::new(),
        };

        for nested in read_rows::<NestedClassRaw>(tables)? {
            loader
                .enclosing
                .insert(nested.nested_class, nested.enclosing_class);
        }

        for param in read_rows::<GenericParamRaw>(tables)? {
            loader
                .generic_params
                .entry(param.owner.token)
                .or_default()
                .push(param);
        }
        for params in loader.generic_params.values_mut() {
            params.sort_by_key(|param| param.number);
        }

        for constraint in read_rows::<GenericParamConstraintRaw>(tables)? {
            loader
                .constraints
                .entry(constraint.owner)
                .or_default()
                .push(constraint.constraint);
        }

        for implementation in read_rows::<InterfaceImplRaw>(tables)? {
            loader
                .interfaces
                .entry(implementation.class)
                .or_default()
                .push(implementation.interface);
        }

        let property_maps = read_rows::<PropertyMapRaw>(tables)?;
        for (index, map) in property_maps.iter().enumerate() {
            let next = property_maps.get(index + 1).map(|next| next.property_list);
            let range = owned_range(map.property_list, next, loader.properties.len());
            loader.property_ranges.insert(map.parent, range);
        }

        for semantics in read_rows::<MethodSemanticsRaw>(tables)? {
            if semantics.association.tag != TableId::Property {
                continue;
            }

            let accessors = loader
                .accessors
                .entry(semantics.association.row)
                .or_default();
            if semantics.semantics & MethodSemanticsAttributes::GETTER != 0 {
                accessors.getter = Some(semantics.method);
            } else if semantics.semantics & MethodSemanticsAttributes::SETTER != 0 {
                accessors.setter = Some(semantics.method);
            }
        }

        loader.method_owners = vec![0; loader.methods.len()];
        for index in 0..loader.typedefs.len() {
            for method in loader.method_range(index) {
                loader.method_owners[method as usize - 1] = loader.typedefs[index].rid;
            }
        }

        for attribute in read_rows::<CustomAttributeRaw>(tables)? {
            if attribute.parent.tag == TableId::MethodDef
                && loader.is_extension_attribute(&attribute.constructor)?
            {
                loader.extensions.insert(attribute.parent.row);
            }
        }

        debug!(
            "Indexed {} types, {} methods, {} fields, {} extension methods",
            loader.typedefs.len(),
            loader.methods.len(),
            loader.fields.len(),
            loader.extensions.len()
        );

        Ok(loader)
    }

    /// Builds the model for every type except the `<Module>` pseudo type.
    pub(crate) fn load(&self) -> Result<LoadedModel> {
        let mut model = LoadedModel {
            types: Vec::with_capacity(self.typedefs.len()),
            members: Vec::with_capacity(self.typedefs.len()),
        };

        for index in 0..self.typedefs.len() {
            let typedef = &self.typedefs[index];
            let qualified = self.typedef_name(typedef.rid)?;
            if typedef.rid == 1 && qualified.name == MODULE_TYPE_NAME {
                continue;
            }

            let generic_parameters = self.generic_parameters(typedef.token, &[])?;
            let generic_names: Vec<String> = generic_parameters
                .iter()
                .map(|parameter| parameter.name.clone())
                .collect();
            let context = GenericContext {
                type_parameters: &generic_names,
                method_parameters: &[],
            };

            let base_type = if typedef.extends.is_null() {
                None
            } else {
                Some(self.type_reference(typedef.extends.tag, typedef.extends.row, context, 0)?)
            };

            let interfaces = match self.interfaces.get(&typedef.rid) {
                Some(interfaces) => interfaces
                    .iter()
                    .map(|interface| self.type_reference(interface.tag, interface.row, context, 0))
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };

            trace!("Loading type {}", qualified.name);

            model.types.push(TypeDefinition {
                token: typedef.token,
                namespace: qualified.namespace,
                name: qualified.name,
                declaring_type: qualified.declaring_type,
                visibility: TypeVisibility::from_type_flags(typedef.flags),
                modifiers: TypeModifiers::from_type_flags(typedef.flags),
                base_type,
                interfaces,
                generic_parameters,
            });
            model.members.push(self.members(index, &generic_names)?);
        }

        Ok(model)
    }

    fn members(&self, index: usize, type_parameters: &[String]) -> Result<Vec<Member>> {
        let typedef = &self.typedefs[index];
        let context = GenericContext {
            type_parameters,
            method_parameters: &[],
        };

        let mut members = Vec::new();
        for rid in self.method_range(index) {
            let method = self.method(rid, type_parameters)?;
            if !method.is_constructor() {
                members.push(Member::Method(method));
            }
        }

        if let Some(range) = self.property_ranges.get(&typedef.rid) {
            for rid in range.clone() {
                members.push(Member::Property(self.property(rid, type_parameters)?));
            }
        }

        for rid in self.field_range(index) {
            let raw = row(&self.fields, TableId::Field, rid)?;
            let signature = parse_field_signature(self.blobs.get(raw.signature as usize)?)?;

            members.push(Member::Field(FieldDefinition {
                name: self.strings.get(raw.name as usize)?.to_string(),
                access: MemberAccessFlags::from_field_flags(raw.flags),
                modifiers: FieldModifiers::from_field_flags(raw.flags),
                field_type: self.convert(&signature.base, context, 0)?,
            }));
        }

        Ok(members)
    }

    fn method(&self, rid: u32, type_parameters: &[String]) -> Result<MethodDefinition> {
        let raw = row(&self.methods, TableId::MethodDef, rid)?;

        let generic_parameters = self.generic_parameters(raw.token, type_parameters)?;
        let method_parameters: Vec<String> = generic_parameters
            .iter()
            .map(|parameter| parameter.name.clone())
            .collect();
        let context = GenericContext {
            type_parameters,
            method_parameters: &method_parameters,
        };

        let signature = parse_method_signature(self.blobs.get(raw.signature as usize)?)?;

        let next_start = self
            .methods
            .get(rid as usize)
            .map(|next| next.param_list);
        let mut names: HashMap<u32, &str> = HashMap::new();
        for param_rid in owned_range(raw.param_list, next_start, self.params.len()) {
            let param = row(&self.params, TableId::Param, param_rid)?;
            names.insert(param.sequence, self.strings.get(param.name as usize)?);
        }

        let mut parameters = Vec::with_capacity(signature.params.len());
        for (position, param) in signature.params.iter().enumerate() {
            let sequence = u32::try_from(position + 1).unwrap_or(u32::MAX);
            parameters.push(Parameter {
                name: names.get(&sequence).copied().unwrap_or_default().to_string(),
                parameter_type: self.convert_parameter(param, context)?,
            });
        }

        Ok(MethodDefinition {
            name: self.strings.get(raw.name as usize)?.to_string(),
            access: MemberAccessFlags::from_method_flags(raw.flags),
            modifiers: MethodModifiers::from_method_flags(raw.flags),
            return_type: self.convert_parameter(&signature.return_type, context)?,
            parameters,
            generic_parameters,
            is_extension: self.extensions.contains(&rid),
        })
    }

    fn property(&self, rid: u32, type_parameters: &[String]) -> Result<PropertyDefinition> {
        let raw = row(&self.properties, TableId::Property, rid)?;
        let signature = parse_property_signature(self.blobs.get(raw.signature as usize)?)?;
        let context = GenericContext {
            type_parameters,
            method_parameters: &[],
        };

        let accessors = self.accessors.get(&rid).copied().unwrap_or_default();
        let getter = match accessors.getter {
            Some(method) => Some(self.method(method, type_parameters)?),
            None => None,
        };
        let setter = match accessors.setter {
            Some(method) => Some(self.method(method, type_parameters)?),
            None => None,
        };

        Ok(PropertyDefinition {
            name: self.strings.get(raw.name as usize)?.to_string(),
            property_type: self.convert(&signature.base, context, 0)?,
            getter,
            setter,
        })
    }

    fn generic_parameters(
        &self,
        owner: Token,
        type_parameters: &[String],
    ) -> Result<Vec<GenericParameter>> {
        let Some(raw_parameters) = self.generic_params.get(&owner) else {
            return Ok(Vec::new());
        };

        let names = raw_parameters
            .iter()
            .map(|param| Ok(self.strings.get(param.name as usize)?.to_string()))
            .collect::<Result<Vec<String>>>()?;

        // Constraints may refer to the parameters being declared
        let context = if owner.table() == TableId::MethodDef as u8 {
            GenericContext {
                type_parameters,
                method_parameters: &names,
            }
        } else {
            GenericContext {
                type_parameters: &names,
                method_parameters: &[],
            }
        };

        let mut parameters = Vec::with_capacity(raw_parameters.len());
        for (param, name) in raw_parameters.iter().zip(&names) {
            let constraints = match self.constraints.get(&param.rid) {
                Some(constraints) => constraints
                    .iter()
                    .map(|constraint| {
                        self.type_reference(constraint.tag, constraint.row, context, 0)
                    })
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };

            parameters.push(GenericParameter {
                name: name.clone(),
                flags: GenericParamFlags::from_bits_truncate(param.flags),
                constraints,
            });
        }

        Ok(parameters)
    }

    fn method_range(&self, index: usize) -> Range<u32> {
        let next = self.typedefs.get(index + 1).map(|next| next.method_list);
        owned_range(self.typedefs[index].method_list, next, self.methods.len())
    }

    fn field_range(&self, index: usize) -> Range<u32> {
        let next = self.typedefs.get(index + 1).map(|next| next.field_list);
        owned_range(self.typedefs[index].field_list, next, self.fields.len())
    }

    fn is_extension_attribute(&self, constructor: &CodedIndex) -> Result<bool> {
        let attribute_type = match constructor.tag {
            TableId::MemberRef => {
                let member = row(&self.memberrefs, TableId::MemberRef, constructor.row)?;
                match member.class.tag {
                    TableId::TypeRef => self.typeref_name(member.class.row)?,
                    TableId::TypeDef => self.typedef_name(member.class.row)?,
                    _ => return Ok(false),
                }
            }
            TableId::MethodDef => {
                let owner = constructor
                    .row
                    .checked_sub(1)
                    .and_then(|index| self.method_owners.get(index as usize))
                    .copied()
                    .unwrap_or(0);
                if owner == 0 {
                    return Ok(false);
                }
                self.typedef_name(owner)?
            }
            _ => return Ok(false),
        };

        Ok(attribute_type.is(EXTENSION_ATTRIBUTE_NAMESPACE, EXTENSION_ATTRIBUTE_NAME))
    }

    fn typedef_name(&self, rid: u32) -> Result<QualifiedName> {
        let raw = row(&self.typedefs, TableId::TypeDef, rid)?;
        let name = self.strings.get(raw.type_name as usize)?.to_string();

        let mut path = Vec::new();
        let mut outermost = raw;
        while let Some(&outer) = self.enclosing.get(&outermost.rid) {
            if path.len() >= MAX_NESTING_DEPTH {
                return Err(RecursionLimit(MAX_NESTING_DEPTH));
            }

            outermost = row(&self.typedefs, TableId::TypeDef, outer)?;
            path.push(self.strings.get(outermost.type_name as usize)?);
        }
        path.reverse();

        Ok(QualifiedName {
            namespace: non_empty(self.strings.get(outermost.type_namespace as usize)?),
            declaring_type: (!path.is_empty()).then(|| path.join("+")),
            name,
        })
    }

    fn typeref_name(&self, rid: u32) -> Result<QualifiedName> {
        let raw = row(&self.typerefs, TableId::TypeRef, rid)?;
        let name = self.strings.get(raw.type_name as usize)?.to_string();

        let mut path = Vec::new();
        let mut outermost = raw;
        while outermost.resolution_scope.tag == TableId::TypeRef
            && !outermost.resolution_scope.is_null()
        {
            if path.len() >= MAX_NESTING_DEPTH {
                return Err(RecursionLimit(MAX_NESTING_DEPTH));
            }

            outermost = row(
                &self.typerefs,
                TableId::TypeRef,
                outermost.resolution_scope.row,
            )?;
            path.push(self.strings.get(outermost.type_name as usize)?);
        }
        path.reverse();

        Ok(QualifiedName {
            namespace: non_empty(self.strings.get(outermost.type_namespace as usize)?),
            declaring_type: (!path.is_empty()).then(|| path.join("+")),
            name,
        })
    }

    /// Resolves a `TypeDef`, `TypeRef` or `TypeSpec` row to a reference
    fn type_reference(
        &self,
        table: TableId,
        rid: u32,
        context: GenericContext<'_>,
        depth: usize,
    ) -> Result<TypeReference> {
        match table {
            TableId::TypeDef => Ok(self.typedef_name(rid)?.into_reference()),
            TableId::TypeRef => Ok(self.typeref_name(rid)?.into_reference()),
            TableId::TypeSpec => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(RecursionLimit(MAX_NESTING_DEPTH));
                }

                let raw = row(&self.typespecs, TableId::TypeSpec, rid)?;
                let signature =
                    parse_type_spec_signature(self.blobs.get(raw.signature as usize)?)?;
                self.convert(&signature.base, context, depth + 1)
            }
            _ => Err(malformed_error!(
                "Type reference into unexpected table - {:?}",
                table
            )),
        }
    }

    fn token_reference(
        &self,
        token: Token,
        context: GenericContext<'_>,
        depth: usize,
    ) -> Result<TypeReference> {
        match TableId::from_number(token.table()) {
            Some(table) => self.type_reference(table, token.row(), context, depth),
            None => Err(TypeNotFound(token)),
        }
    }

    fn convert_parameter(
        &self,
        parameter: &SignatureParameter,
        context: GenericContext<'_>,
    ) -> Result<TypeReference> {
        let base = self.convert(&parameter.base, context, 0)?;
        Ok(if parameter.by_ref {
            TypeReference::by_ref(base)
        } else {
            base
        })
    }

    /// Converts a decoded signature type into a model reference
    fn convert(
        &self,
        signature: &TypeSignature,
        context: GenericContext<'_>,
        depth: usize,
    ) -> Result<TypeReference> {
        let system = |name: &str| -> Result<TypeReference> {
            Ok(TypeReference::system(name))
        };

        match signature {
            TypeSignature::Void => system("Void"),
            TypeSignature::Boolean => system("Boolean"),
            TypeSignature::Char => system("Char"),
            TypeSignature::I1 => system("SByte"),
            TypeSignature::U1 => system("Byte"),
            TypeSignature::I2 => system("Int16"),
            TypeSignature::U2 => system("UInt16"),
            TypeSignature::I4 => system("Int32"),
            TypeSignature::U4 => system("UInt32"),
            TypeSignature::I8 => system("Int64"),
            TypeSignature::U8 => system("UInt64"),
            TypeSignature::R4 => system("Single"),
            TypeSignature::R8 => system("Double"),
            TypeSignature::String => system("String"),
            TypeSignature::Object => system("Object"),
            TypeSignature::I => system("IntPtr"),
            TypeSignature::U => system("UIntPtr"),
            TypeSignature::TypedByRef => system("TypedReference"),
            // Function pointers are shown by their runtime representation
            TypeSignature::FnPtr(_) => system("IntPtr"),
            TypeSignature::Ptr(element) => Ok(TypeReference::Pointer(Box::new(
                self.convert(element, context, depth)?,
            ))),
            TypeSignature::ByRef(element) => Ok(TypeReference::ByRef(Box::new(
                self.convert(element, context, depth)?,
            ))),
            TypeSignature::Pinned(element) => self.convert(element, context, depth),
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                self.token_reference(*token, context, depth)
            }
            TypeSignature::GenericParamType(number) => Ok(context.type_parameter(*number)),
            TypeSignature::GenericParamMethod(number) => Ok(context.method_parameter(*number)),
            TypeSignature::SzArray(element) => Ok(TypeReference::array(
                self.convert(element, context, depth)?,
            )),
            TypeSignature::Array(array) => Ok(TypeReference::Array {
                element: Box::new(self.convert(&array.base, context, depth)?),
                rank: array.rank,
            }),
            TypeSignature::GenericInst(base, arguments) => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.convert(argument, context, depth))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self
                    .convert(base, context, depth)?
                    .with_generic_arguments(arguments))
            }
            TypeSignature::Unknown => Err(malformed_error!("Undefined type in signature")),
        }
    }
}
