use super::builder_class::string_template;
use crate::inspector::{collect_class_methods, has_similar_method, nested_class_name};
use crate::names::{Marker, TO_STRING};
use crate::problem::ProblemSink;
use crate::processor::support::{
    FieldAccess, filter_fields, validate_exclude_param, validate_of_param,
};
use crate::processor::{ClassProcessor, ProcessContext};
use crate::synth::{LightMethodBuilder, NavigationTarget, VirtualElement};
use jv_lombok_ast::{Annotation, ClassDecl, ClassKind, JavaType, Visibility};
use jv_lombok_codegen::{JavaBlock, JavaExpr};

#[derive(Debug, Default)]
pub struct ToStringProcessor;

impl ClassProcessor for ToStringProcessor {
    fn key(&self) -> &'static str {
        "to_string"
    }

    fn marker(&self) -> &'static Marker {
        &TO_STRING
    }

    fn validate(
        &self,
        cx: &ProcessContext<'_>,
        annotation: &Annotation,
        class: &ClassDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool {
        if !matches!(class.kind, ClassKind::Class | ClassKind::Enum) {
            sink.add_error(
                format!("'@{}' is only supported on a class or enum type", TO_STRING.simple_name()),
                Vec::new(),
            );
            return false;
        }

        let of = annotation.string_list_attribute("of");
        let exclude = annotation.string_list_attribute("exclude");
        validate_of_param(cx.tree, class, sink, annotation, &of);
        validate_exclude_param(cx.tree, class, sink, annotation, &exclude, &of);

        let methods = collect_class_methods(cx.tree, class);
        if has_similar_method(&methods, "toString", 0) {
            sink.add_warning(
                "Not generated 'toString()': A method with same name already exists".to_string(),
                Vec::new(),
            );
            return false;
        }
        true
    }

    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        class: &ClassDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    ) {
        let include_field_names = annotation.bool_attribute_or("includeFieldNames", true);
        let call_super = annotation.bool_attribute_or("callSuper", false);
        let do_not_use_getters = annotation.bool_attribute_or("doNotUseGetters", false);

        let mut parts: Vec<(String, JavaExpr)> = Vec::new();
        if call_super {
            let label = if include_field_names { "super=" } else { "" };
            parts.push((
                label.to_string(),
                JavaExpr::call(JavaExpr::Super, "toString", Vec::new()),
            ));
        }
        for field in filter_fields(cx.tree, class, annotation, false) {
            let separator = if parts.is_empty() { "" } else { ", " };
            let label = if include_field_names {
                format!("{}{}=", separator, field.name)
            } else {
                separator.to_string()
            };
            let value = FieldAccess::resolve(cx, do_not_use_getters, field, class).on(JavaExpr::This);
            let value = if field.ty.is_array() {
                let method = if field.ty.is_object_array() { "deepToString" } else { "toString" };
                JavaExpr::static_call("java.util.Arrays", method, vec![value])
            } else {
                value
            };
            parts.push((label, value));
        }

        let body = string_template(&nested_class_name(cx.tree, class), parts);
        let method = LightMethodBuilder::new("toString", class.id, NavigationTarget::Annotation(annotation.id))
            .with_visibility(Visibility::Public)
            .with_return_type(JavaType::string())
            .with_body(JavaBlock::returning(body))
            .build();
        target.push(VirtualElement::Member(method));
    }
}
