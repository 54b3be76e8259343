//! Structural queries over a class declaration.

use crate::names::is_intern_field;
use jv_lombok_ast::{
    ClassDecl, FieldDecl, JavaType, JavaWildcardKind, MethodDecl, SourceTree,
};

pub fn collect_class_constructors<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
) -> Vec<&'t MethodDecl> {
    tree.methods_of(class)
        .filter(|method| method.is_constructor)
        .collect()
}

/// Declared methods, constructors excluded.
pub fn collect_class_methods<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
) -> Vec<&'t MethodDecl> {
    tree.methods_of(class)
        .filter(|method| !method.is_constructor)
        .collect()
}

pub fn find_field_by_name<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
    name: &str,
) -> Option<&'t FieldDecl> {
    tree.fields_of(class).find(|field| field.name == name)
}

pub fn has_method_by_name(methods: &[&MethodDecl], name: &str) -> bool {
    methods.iter().any(|method| method.name == name)
}

/// A method with the same name and parameter count.
pub fn has_similar_method(methods: &[&MethodDecl], name: &str, parameter_count: usize) -> bool {
    methods
        .iter()
        .any(|method| method.name == name && method.parameters.len() == parameter_count)
}

pub fn inner_class_by_name<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
    name: &str,
) -> Option<&'t ClassDecl> {
    tree.inner_classes_of(class).find(|inner| inner.name == name)
}

/// `Outer.Inner` style name without the package.
pub fn nested_class_name(tree: &SourceTree, class: &ClassDecl) -> String {
    let mut segments = vec![class.name.as_str()];
    let mut outer = class.outer;
    while let Some(id) = outer {
        match tree.class(id) {
            Some(decl) => {
                segments.push(decl.name.as_str());
                outer = decl.outer;
            }
            None => break,
        }
    }
    segments.reverse();
    segments.join(".")
}

/// The class type parameterized with its own type variables, e.g. `Box<T>`.
pub fn type_with_generics(class: &ClassDecl) -> JavaType {
    JavaType::generic(
        class.qualified_name.clone(),
        class
            .type_parameters
            .iter()
            .map(|name| JavaType::type_variable(name.clone()))
            .collect(),
    )
}

/// The class type with every type argument replaced by `?`.
pub fn type_with_wildcards(class: &ClassDecl) -> JavaType {
    JavaType::generic(
        class.qualified_name.clone(),
        class
            .type_parameters
            .iter()
            .map(|_| JavaType::Wildcard {
                kind: JavaWildcardKind::Unbounded,
                bound: None,
            })
            .collect(),
    )
}

pub fn parameter_types<'t>(tree: &'t SourceTree, method: &'t MethodDecl) -> Vec<&'t JavaType> {
    tree.parameters_of(method).map(|parameter| &parameter.ty).collect()
}

/// Fields an all-arguments constructor takes, in declaration order: skips
/// synthetic, static, and initialized final fields.
pub fn constructor_fields<'t>(tree: &'t SourceTree, class: &'t ClassDecl) -> Vec<&'t FieldDecl> {
    tree.fields_of(class)
        .filter(|field| {
            !is_intern_field(&field.name)
                && !field.modifiers.is_static
                && !(field.modifiers.is_final && field.initializer.is_some())
        })
        .collect()
}

/// Declared constructor whose parameter types match `types` exactly.
pub fn find_constructor_with_types<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
    types: &[&JavaType],
) -> Option<&'t MethodDecl> {
    collect_class_constructors(tree, class)
        .into_iter()
        .find(|constructor| {
            let declared = parameter_types(tree, constructor);
            declared.len() == types.len()
                && declared
                    .iter()
                    .zip(types)
                    .all(|(left, right)| left.is_equivalent_to(right))
        })
}
