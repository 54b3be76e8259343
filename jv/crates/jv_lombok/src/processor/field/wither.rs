use crate::accessors::{AccessorsInfo, has_is_prefix};
use crate::inspector::{
    collect_class_constructors, collect_class_methods, constructor_fields, has_similar_method,
    parameter_types, type_with_generics,
};
use crate::locator::is_annotated_with;
use crate::names::{
    ALL_ARGS_CONSTRUCTOR, CopyableAnnotation, Marker, NON_NULL, REQUIRED_ARGS_CONSTRUCTOR,
    WITHER, capitalize, is_intern_field,
};
use crate::problem::ProblemSink;
use crate::processor::{FieldProcessor, ProcessContext, method_visibility};
use crate::quickfix::QuickFix;
use crate::synth::{LightMethodBuilder, NavigationTarget, VirtualElement, copy_annotations};
use jv_lombok_ast::{Annotation, ClassDecl, FieldDecl, Modifier};
use jv_lombok_codegen::{JavaBlock, JavaExpr};
use tracing::trace;

/// `withX` for field `x`; a boolean style `isActive` becomes `withActive`.
pub fn wither_name(field_name: &str) -> String {
    let suffix = if has_is_prefix(field_name) {
        &field_name[2..]
    } else {
        field_name
    };
    format!("with{}", capitalize(suffix))
}

/// `withIsActive` for `isActive`; same as [`wither_name`] otherwise.
pub fn second_wither_name(field_name: &str) -> String {
    format!("with{}", capitalize(field_name))
}

/// `@Wither` / `@With` on a field: a copy of the instance with one field replaced.
#[derive(Debug, Default)]
pub struct WitherFieldProcessor;

impl FieldProcessor for WitherFieldProcessor {
    fn key(&self) -> &'static str {
        "wither"
    }

    fn marker(&self) -> &'static Marker {
        &WITHER
    }

    fn validate(
        &self,
        cx: &ProcessContext<'_>,
        annotation: &Annotation,
        field: &FieldDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool {
        let mut valid = method_visibility(annotation, "value").is_some();
        valid &= valid_non_static(field, annotation, sink);
        valid &= valid_not_intern(field, annotation, sink);
        valid &= valid_has_constructor(cx, field, sink);
        valid &= valid_is_unique(cx, field, annotation, sink);
        valid
    }

    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        field: &FieldDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    ) {
        let Some(visibility) = method_visibility(annotation, "value") else {
            return;
        };
        let Some(class) = cx.tree.class(field.containing_class) else {
            return;
        };
        let accessors = AccessorsInfo::build(cx.tree, field, &cx.config.accessors);
        let name = wither_name(&accessors.remove_prefix(&field.name));
        trace!(field = %field.name, method = %name, "wither");

        let return_type = type_with_generics(class);
        let body = JavaBlock::returning(JavaExpr::conditional(
            JavaExpr::eq(JavaExpr::this_field(&field.name), JavaExpr::ident(&field.name)),
            JavaExpr::This,
            JavaExpr::new_instance(return_type.clone(), constructor_call(cx, field, class)),
        ));

        let method = LightMethodBuilder::new(name, class.id, NavigationTarget::Field(field.id))
            .with_visibility(visibility)
            .with_return_type(return_type)
            .with_parameter(&field.name, field.ty.clone())
            .with_body(body)
            .with_annotations(copy_annotations(cx.tree, field.id, &CopyableAnnotation::ALL))
            .build();
        target.push(VirtualElement::Member(method));
    }
}

fn valid_non_static(field: &FieldDecl, annotation: &Annotation, sink: &mut dyn ProblemSink) -> bool {
    if field.modifiers.is_static {
        sink.add_error(
            format!(
                "'@{}' on static field is not allowed",
                WITHER.display_name(annotation)
            ),
            vec![QuickFix::modifier(field.id, Modifier::Static, false)],
        );
        return false;
    }
    true
}

/// `$` fields never reach the constructor call, so their wither would be a no-op.
fn valid_not_intern(field: &FieldDecl, annotation: &Annotation, sink: &mut dyn ProblemSink) -> bool {
    if is_intern_field(&field.name) {
        sink.add_warning(
            format!(
                "Not generating '@{}' for field '{}': fields starting with '$' are never passed to a constructor",
                WITHER.display_name(annotation),
                field.name
            ),
            Vec::new(),
        );
        return false;
    }
    true
}

fn valid_has_constructor(cx: &ProcessContext<'_>, field: &FieldDecl, sink: &mut dyn ProblemSink) -> bool {
    let Some(class) = cx.tree.class(field.containing_class) else {
        return false;
    };
    if is_annotated_with(cx.tree, class.id, &ALL_ARGS_CONSTRUCTOR) {
        return true;
    }
    let has_matching_parameter = collect_class_constructors(cx.tree, class)
        .into_iter()
        .any(|constructor| {
            parameter_types(cx.tree, constructor)
                .into_iter()
                .any(|ty| ty.is_equivalent_to(&field.ty))
        });
    if has_matching_parameter {
        return true;
    }
    let required_args = is_annotated_with(cx.tree, class.id, &REQUIRED_ARGS_CONSTRUCTOR);
    if required_args
        && (field.modifiers.is_final || is_annotated_with(cx.tree, field.id, &NON_NULL))
    {
        return true;
    }
    sink.add_warning(
        format!(
            "Compilation will fail : no constructor with a parameter of type '{}' was found",
            field.ty.canonical_text()
        ),
        Vec::new(),
    );
    false
}

fn valid_is_unique(
    cx: &ProcessContext<'_>,
    field: &FieldDecl,
    annotation: &Annotation,
    sink: &mut dyn ProblemSink,
) -> bool {
    let Some(class) = cx.tree.class(field.containing_class) else {
        return true;
    };
    let methods = collect_class_methods(cx.tree, class);
    let accessors = AccessorsInfo::build(cx.tree, field, &cx.config.accessors);
    let generated = wither_name(&accessors.remove_prefix(&field.name));
    let taken = [
        generated.clone(),
        wither_name(&field.name),
        second_wither_name(&field.name),
    ]
    .iter()
    .any(|name| has_similar_method(&methods, name, 1));
    if taken {
        sink.add_warning(
            format!(
                "No '@{}' generated : a method named '{}' taking one parameter already exists",
                WITHER.display_name(annotation),
                generated
            ),
            Vec::new(),
        );
        return false;
    }
    true
}

/// Arguments of the all-fields constructor call, with `field` replaced by
/// the method parameter.
fn constructor_call(cx: &ProcessContext<'_>, field: &FieldDecl, class: &ClassDecl) -> Vec<JavaExpr> {
    constructor_fields(cx.tree, class)
        .into_iter()
        .map(|candidate| {
            if candidate.id == field.id {
                JavaExpr::ident(&candidate.name)
            } else {
                JavaExpr::this_field(&candidate.name)
            }
        })
        .collect()
}
