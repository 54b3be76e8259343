//! Validation and field selection helpers shared by the class processors.

use crate::accessors::AccessorsInfo;
use crate::inspector::{collect_class_methods, find_field_by_name, has_method_by_name};
use crate::names::is_intern_field;
use crate::problem::ProblemSink;
use crate::quickfix::QuickFix;
use crate::processor::ProcessContext;
use jv_lombok_ast::{Annotation, ClassDecl, FieldDecl, SourceTree};
use jv_lombok_codegen::JavaExpr;
use std::collections::BTreeSet;

/// Warns when `callSuper` is left implicit on a class that extends something.
pub fn validate_call_super_param(
    annotation: &Annotation,
    class: &ClassDecl,
    sink: &mut dyn ProblemSink,
    generated_method_name: &str,
) {
    if annotation.bool_attribute("callSuper").is_none() && class.has_explicit_super_class() {
        sink.add_warning(
            format!(
                "Generating {} implementation but without a call to superclass, \
                 even though this class does not extend java.lang.Object. \
                 If this is intentional, add '(callSuper=false)' to your type.",
                generated_method_name
            ),
            vec![
                QuickFix::change_annotation_parameter(annotation, "callSuper", Some("true".into())),
                QuickFix::change_annotation_parameter(annotation, "callSuper", Some("false".into())),
            ],
        );
    }
}

pub fn validate_of_param(
    tree: &SourceTree,
    class: &ClassDecl,
    sink: &mut dyn ProblemSink,
    annotation: &Annotation,
    of: &[String],
) {
    for field_name in of.iter().filter(|name| !name.trim().is_empty()) {
        if find_field_by_name(tree, class, field_name).is_none() {
            sink.add_warning(
                format!("The field '{}' does not exist", field_name),
                vec![QuickFix::change_annotation_parameter(
                    annotation,
                    "of",
                    calc_new_property_value(of, field_name),
                )],
            );
        }
    }
}

/// Like [`validate_of_param`], and additionally flags names that the field
/// filter drops on its own: static fields, and `$` fields not re-included
/// through `of`.
pub fn validate_exclude_param(
    tree: &SourceTree,
    class: &ClassDecl,
    sink: &mut dyn ProblemSink,
    annotation: &Annotation,
    exclude: &[String],
    of: &[String],
) {
    for field_name in exclude.iter().filter(|name| !name.trim().is_empty()) {
        let message = match find_field_by_name(tree, class, field_name) {
            None => format!("The field '{}' does not exist", field_name),
            Some(field) if is_excluded_anyway(field, of) => {
                format!("The field '{}' would have been excluded anyway", field_name)
            }
            Some(_) => continue,
        };
        sink.add_warning(
            message,
            vec![QuickFix::change_annotation_parameter(
                annotation,
                "exclude",
                calc_new_property_value(exclude, field_name),
            )],
        );
    }
}

fn is_excluded_anyway(field: &FieldDecl, of: &[String]) -> bool {
    field.modifiers.is_static
        || (is_intern_field(&field.name) && !of.iter().any(|name| *name == field.name))
}

/// Attribute value after dropping one occurrence of `field_name`, written as
/// a brace list (`{"a","b"}`); `None` when nothing remains.
pub fn calc_new_property_value(all: &[String], field_name: &str) -> Option<String> {
    let mut rest: Vec<&String> = all.iter().collect();
    if let Some(position) = rest.iter().position(|name| *name == field_name) {
        rest.remove(position);
    }
    if rest.is_empty() {
        return None;
    }
    let quoted: Vec<String> = rest.iter().map(|name| format!("\"{}\"", name)).collect();
    Some(format!("{{{}}}", quoted.join(",")))
}

pub fn make_set(values: Vec<String>) -> BTreeSet<String> {
    values.into_iter().collect()
}

/// Fields taking part in generated equality, hashing and string output.
///
/// Declaration order is kept. Dropped, in this order: static fields,
/// transient fields when `filter_transient`, excluded names, names missing
/// from a non-empty `of`, and `$` fields not named in `of`.
pub fn filter_fields<'t>(
    tree: &'t SourceTree,
    class: &'t ClassDecl,
    annotation: &Annotation,
    filter_transient: bool,
) -> Vec<&'t FieldDecl> {
    let exclude = make_set(annotation.string_list_attribute("exclude"));
    let of = make_set(annotation.string_list_attribute("of"));

    tree.fields_of(class)
        .filter(|field| {
            if field.modifiers.is_static || (filter_transient && field.modifiers.is_transient) {
                return false;
            }
            if exclude.contains(&field.name) {
                return false;
            }
            if !of.is_empty() && !of.contains(&field.name) {
                return false;
            }
            !(is_intern_field(&field.name) && !of.contains(&field.name))
        })
        .collect()
}

/// How generated code reads one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccess {
    Getter(String),
    Field(String),
}

impl FieldAccess {
    /// Resolves getter use: the conventional getter must be declared on the
    /// class and getters must not be switched off.
    pub fn resolve(
        cx: &ProcessContext<'_>,
        do_not_use_getters: bool,
        field: &FieldDecl,
        class: &ClassDecl,
    ) -> Self {
        if do_not_use_getters {
            return FieldAccess::Field(field.name.clone());
        }
        let getter = AccessorsInfo::build(cx.tree, field, &cx.config.accessors).getter_name(field);
        let methods = collect_class_methods(cx.tree, class);
        if has_method_by_name(&methods, &getter) {
            FieldAccess::Getter(getter)
        } else {
            FieldAccess::Field(field.name.clone())
        }
    }

    pub fn on(&self, receiver: JavaExpr) -> JavaExpr {
        match self {
            FieldAccess::Getter(name) => JavaExpr::call(receiver, name.clone(), Vec::new()),
            FieldAccess::Field(name) => JavaExpr::field(receiver, name.clone()),
        }
    }
}

/// `getName()` when a getter is used, otherwise the raw field name.
pub fn build_attribute_name_string(
    cx: &ProcessContext<'_>,
    do_not_use_getters: bool,
    field: &FieldDecl,
    class: &ClassDecl,
) -> String {
    match FieldAccess::resolve(cx, do_not_use_getters, field, class) {
        FieldAccess::Getter(name) => format!("{}()", name),
        FieldAccess::Field(name) => name,
    }
}
