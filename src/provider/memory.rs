use std::collections::HashMap;

use crate::{
    metadata::{tables::TableId, token::Token},
    model::{Member, TypeDefinition, TypeKey, TypeReference},
    provider::MetadataProvider,
};

/// A provider over types assembled in code.
///
/// Types keep the order they are added in. A type added without a token gets the next
/// `TypeDef` token.
#[derive(Debug, Default, Clone)]
pub struct InMemoryModule {
    types: Vec<TypeDefinition>,
    members: Vec<Vec<Member>>,
    by_token: HashMap<Token, usize>,
    by_key: HashMap<TypeKey, usize>,
}

impl InMemoryModule {
    /// An empty module
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type with its members and returns the type's token
    pub fn add_type(&mut self, mut definition: TypeDefinition, members: Vec<Member>) -> Token {
        if definition.token.is_null() {
            definition.token = Token::from_parts(TableId::TypeDef as u8, self.next_row());
        }

        let index = self.types.len();
        let token = definition.token;

        self.by_token.insert(token, index);
        self.by_key.entry(definition.key()).or_insert(index);
        self.types.push(definition);
        self.members.push(members);

        token
    }

    fn next_row(&self) -> u32 {
        self.types
            .iter()
            .filter(|ty| ty.token.table() == TableId::TypeDef as u8)
            .map(|ty| ty.token.row())
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl MetadataProvider for InMemoryModule {
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
