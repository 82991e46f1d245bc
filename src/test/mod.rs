//! Synthetic modules for unit tests.
//!
//! [`MetadataBuilder`] writes metadata roots row by row and [`pe_image`] wraps them into a PE
//! file, so the full loading path runs without binaries checked into the repository.

mod builder;

pub use builder::*;

use crate::metadata::tables::{CodedIndexType, TableId};

/// `static void (string)`
const STATIC_VOID_STRING: &[u8] = &[0x00, 0x01, 0x01, 0x0E];

/// Metadata of a small library:
///
/// ```text
/// namespace Samples
/// {
///     internal class TestClass3<T> where T : class, new() { }
///
///     public static class StringExtensions
///     {
///         public static void Method1(this string str) { }
///         public static void Method2(this string str, bool flag) { }
///         public static string Method3(this string str) { }
///     }
///
///     public enum Color { Red, Green, Blue }
///
///     public class Person : IComparable
///     {
///         public string Name { get; private set; }
///         public T Convert<T>(T value) where T : IComparable { }
///
///         public class Address { public string Street; }
///     }
/// }
/// ```
pub fn sample_metadata() -> Vec<u8> {
    let mut builder = MetadataBuilder::new();

    let assembly_scope = coded(CodedIndexType::ResolutionScope, TableId::AssemblyRef, 1);
    let object = builder.type_ref(assembly_scope, "System", "Object");
    let system_enum = builder.type_ref(assembly_scope, "System", "Enum");
    let extension_attribute = builder.type_ref(
        assembly_scope,
        "System.Runtime.CompilerServices",
        "ExtensionAttribute",
    );
    let comparable = builder.type_ref(assembly_scope, "System", "IComparable");

    let extends_object = coded(CodedIndexType::TypeDefOrRef, TableId::TypeRef, object);
    let extends_enum = coded(CodedIndexType::TypeDefOrRef, TableId::TypeRef, system_enum);

    // TypeDef 1..=6
    builder.type_def(0, "", "<Module>", 0, 1, 1);
    let test_class = builder.type_def(0x0010_0000, "Samples", "TestClass3`1", extends_object, 1, 1);
    let extensions = builder.type_def(
        0x0010_0181,
        "Samples",
        "StringExtensions",
        extends_object,
        1,
        2,
    );
    let color = builder.type_def(0x0101, "Samples", "Color", extends_enum, 1, 5);
    let person = builder.type_def(0x0010_0001, "Samples", "Person", extends_object, 5, 5);
    let address = builder.type_def(0x0010_0002, "", "Address", extends_object, 6, 9);

    // Field 1..=6
    let color_sig = [&[0x06, 0x11][..], &type_def_or_ref(TableId::TypeDef, color)].concat();
    builder.field(0x0606, "value__", &[0x06, 0x08]);
    builder.field(0x8056, "Red", &color_sig);
    builder.field(0x8056, "Green", &color_sig);
    builder.field(0x8056, "Blue", &color_sig);
    builder.field(0x0001, "<Name>k__BackingField", &[0x06, 0x0E]);
    builder.field(0x0006, "Street", &[0x06, 0x0E]);

    // MethodDef 1..=8, Param 1..=6
    builder.method(0x1886, ".ctor", &[0x20, 0x00, 0x01], 1);
    let method1 = builder.method(0x0096, "Method1", STATIC_VOID_STRING, 1);
    let method2 = builder.method(0x0096, "Method2", &[0x00, 0x02, 0x01, 0x0E, 0x02], 2);
    let method3 = builder.method(0x0096, "Method3", &[0x00, 0x01, 0x0E, 0x0E], 4);
    let getter = builder.method(0x0886, "get_Name", &[0x20, 0x00, 0x0E], 5);
    let setter = builder.method(0x0881, "set_Name", &[0x20, 0x01, 0x01, 0x0E], 5);
    builder.method(0x1886, ".ctor", &[0x20, 0x00, 0x01], 6);
    let convert = builder.method(0x0086, "Convert", &[0x30, 0x01, 0x01, 0x1E, 0x00, 0x1E, 0x00], 6);

    builder.param(1, "str");
    builder.param(1, "str");
    builder.param(2, "flag");
    builder.param(1, "str");
    builder.param(1, "value");
    builder.param(1, "value");

    builder.interface_impl(
        person as u16,
        coded(CodedIndexType::TypeDefOrRef, TableId::TypeRef, comparable),
    );

    let attribute_ctor = builder.member_ref(
        coded(CodedIndexType::MemberRefParent, TableId::TypeRef, extension_attribute),
        ".ctor",
        &[0x20, 0x00, 0x01],
    );
    let ctor = coded(CodedIndexType::CustomAttributeType, TableId::MemberRef, attribute_ctor);
    let marker = [0x01, 0x00, 0x00, 0x00];
    builder.custom_attribute(
        coded(CodedIndexType::HasCustomAttribute, TableId::TypeDef, extensions),
        ctor,
        &marker,
    );
    for method in [method1, method2, method3] {
        builder.custom_attribute(
            coded(CodedIndexType::HasCustomAttribute, TableId::MethodDef, method),
            ctor,
            &marker,
        );
    }

    builder.property_map(person as u16, 1);
    let name = builder.property("Name", &[0x28, 0x00, 0x0E]);
    let association = coded(CodedIndexType::HasSemantics, TableId::Property, name);
    builder.method_semantics(0x0001, setter as u16, association);
    builder.method_semantics(0x0002, getter as u16, association);

    builder.nested_class(address as u16, person as u16);

    builder.generic_param(
        0,
        0x0014,
        coded(CodedIndexType::TypeOrMethodDef, TableId::TypeDef, test_class),
        "T",
    );
    let method_parameter = builder.generic_param(
        0,
        0,
        coded(CodedIndexType::TypeOrMethodDef, TableId::MethodDef, convert),
        "T",
    );
    builder.generic_param_constraint(
        method_parameter as u16,
        coded(CodedIndexType::TypeDefOrRef, TableId::TypeRef, comparable),
    );

    builder.build()
}
