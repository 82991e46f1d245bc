//! Type names, generic argument lists and constraint clauses.

use crate::model::{GenericParamFlags, GenericParameter, TypeReference};

/// Removes the generic arity suffix compilers append to names, e.g. ``List`1`` to `List`.
///
/// Only a backtick followed by digits is removed; a lone backtick is kept.
#[must_use]
pub fn strip_arity(name: &str) -> &str {
    match name.rfind('`') {
        Some(position)
            if position + 1 < name.len()
                && name[position + 1..].bytes().all(|byte| byte.is_ascii_digit()) =>
        {
            &name[..position]
        }
        _ => name,
    }
}

/// Simple name of a referenced type with its generic arguments.
///
/// ```rust
/// use dotbrowse::model::TypeReference;
/// use dotbrowse::render::render_type_reference;
///
/// let list = TypeReference::named("System.Collections.Generic", "List`1")
///     .with_generic_arguments(vec![TypeReference::system("Int32")]);
/// assert_eq!(render_type_reference(&TypeReference::array(list)), "List<Int32>[]");
/// ```
#[must_use]
pub fn render_type_reference(reference: &TypeReference) -> String {
    match reference {
        TypeReference::Named {
            name,
            generic_arguments,
            ..
        } => {
            let mut rendered = strip_arity(name).to_string();
            rendered.push_str(&render_generic_arguments(generic_arguments));
            rendered
        }
        TypeReference::GenericParameter(name) => name.clone(),
        TypeReference::Array { element, rank } => {
            let mut rendered = render_type_reference(element);
            rendered.push('[');
            for _ in 1..*rank {
                rendered.push(',');
            }
            rendered.push(']');
            rendered
        }
        TypeReference::ByRef(element) => render_type_reference(element) + "&",
        TypeReference::Pointer(element) => render_type_reference(element) + "*",
    }
}

/// `<T1, T2, ...>`, recursing into arguments that are generic instances themselves.
///
/// An empty list renders as the empty string.
#[must_use]
pub fn render_generic_arguments(arguments: &[TypeReference]) -> String {
    if arguments.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = arguments.iter().map(render_type_reference).collect();
    format!("<{}>", rendered.join(", "))
}

/// `<T, U>` from declared generic parameters, empty if there are none
#[must_use]
pub fn render_generic_parameters(parameters: &[GenericParameter]) -> String {
    if parameters.is_empty() {
        return String::new();
    }

    let names: Vec<&str> = parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    format!("<{}>", names.join(", "))
}

/// The constraint list of one generic parameter.
///
/// Constraint types come first in declaration order, followed by `class`, `notnull` and
/// `new()` for the special constraint flags. Empty if the parameter is unconstrained.
#[must_use]
pub fn render_generic_parameter_constraints(parameter: &GenericParameter) -> String {
    let mut constraints: Vec<String> = parameter
        .constraints
        .iter()
        .map(render_type_reference)
        .collect();

    let special = parameter.flags & GenericParamFlags::SPECIAL_CONSTRAINT_MASK;
    if special.contains(GenericParamFlags::REFERENCE_TYPE_CONSTRAINT) {
        constraints.push("class".to_string());
    }
    if special.contains(GenericParamFlags::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT) {
        constraints.push("notnull".to_string());
    }
    if special.contains(GenericParamFlags::DEFAULT_CONSTRUCTOR_CONSTRAINT) {
        constraints.push("new()".to_string());
    }

    constraints.join(", ")
}

/// ` where T: ... where U: ...` for every constrained parameter, empty if there are none
#[must_use]
pub fn render_constraint_clause(parameters: &[GenericParameter]) -> String {
    let mut clause = String::new();

    for parameter in parameters {
        let constraints = render_generic_parameter_constraints(parameter);
        if constraints.is_empty() {
            continue;
        }

        clause.push_str(" where ");
        clause.push_str(&parameter.name);
        clause.push_str(": ");
        clause.push_str(&constraints);
    }

    clause
}
