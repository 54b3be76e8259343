use crate::inspector::{constructor_fields, inner_class_by_name, nested_class_name, type_with_generics};
use crate::names::{BUILDER, Marker};
use crate::problem::ProblemSink;
use crate::processor::{ClassProcessor, ProcessContext};
use crate::synth::{LightClassBuilder, LightMethodBuilder, NavigationTarget, VirtualElement};
use jv_lombok_ast::{
    Annotation, ClassDecl, ClassKind, JavaType, Modifiers, Visibility, is_java_identifier,
};
use jv_lombok_codegen::{JavaBlock, JavaExpr, JavaStmt};
use tracing::trace;

const NAME_ATTRIBUTES: &[&str] = &["builderClassName", "builderMethodName", "buildMethodName"];

/// `builderClassName`, or `<ClassName>Builder`.
pub fn builder_class_name(annotation: &Annotation, class: &ClassDecl) -> String {
    non_blank(annotation, "builderClassName")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}Builder", class.name))
}

pub fn builder_method_name(annotation: &Annotation) -> String {
    non_blank(annotation, "builderMethodName")
        .unwrap_or("builder")
        .to_string()
}

pub fn build_method_name(annotation: &Annotation) -> String {
    non_blank(annotation, "buildMethodName")
        .unwrap_or("build")
        .to_string()
}

fn non_blank<'a>(annotation: &'a Annotation, attribute: &str) -> Option<&'a str> {
    annotation
        .string_attribute(attribute)
        .filter(|value| !value.trim().is_empty())
}

/// Checks shared by the holder class and the factory method.
pub(crate) fn validate_builder(
    annotation: &Annotation,
    class: &ClassDecl,
    sink: &mut dyn ProblemSink,
) -> bool {
    let mut valid = true;
    if class.kind != ClassKind::Class {
        sink.add_error(
            format!("'@{}' is only supported on a class type", BUILDER.simple_name()),
            Vec::new(),
        );
        valid = false;
    }
    for attribute in NAME_ATTRIBUTES {
        if let Some(value) = non_blank(annotation, attribute) {
            if !is_java_identifier(value) {
                sink.add_error(
                    format!("'{}' must be a valid Java identifier, got '{}'", attribute, value),
                    Vec::new(),
                );
                valid = false;
            }
        }
    }
    valid
}

/// Builder holder class generated for `@Builder`.
#[derive(Debug, Default)]
pub struct BuilderClassProcessor;

impl ClassProcessor for BuilderClassProcessor {
    fn key(&self) -> &'static str {
        "builder"
    }

    fn marker(&self) -> &'static Marker {
        &BUILDER
    }

    fn validate(
        &self,
        _cx: &ProcessContext<'_>,
        annotation: &Annotation,
        class: &ClassDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool {
        validate_builder(annotation, class, sink)
    }

    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        class: &ClassDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    ) {
        let holder_name = builder_class_name(annotation, class);
        if inner_class_by_name(cx.tree, class, &holder_name).is_some() {
            trace!(class = %class.qualified_name, holder = %holder_name, "builder class declared in source");
            return;
        }

        let navigation = NavigationTarget::Annotation(annotation.id);
        let holder_qualified = format!("{}.{}", class.qualified_name, holder_name);
        let holder_type = JavaType::generic(
            holder_qualified.clone(),
            class
                .type_parameters
                .iter()
                .map(|name| JavaType::type_variable(name.clone()))
                .collect(),
        );
        let fields = constructor_fields(cx.tree, class);

        let mut holder = LightClassBuilder::new(&holder_name, holder_qualified, class.id, navigation)
            .with_modifiers(Modifiers {
                visibility: Visibility::Public,
                is_static: true,
                ..Modifiers::default()
            })
            .with_type_parameters(&class.type_parameters);

        holder = holder.with_method(
            LightMethodBuilder::constructor(&holder_name, class.id, navigation)
                .with_body(JavaBlock::default())
                .build(),
        );

        for field in &fields {
            holder = holder.with_field(
                &field.name,
                field.ty.clone(),
                Modifiers::with_visibility(Visibility::Private),
            );
            let setter = LightMethodBuilder::new(&field.name, class.id, NavigationTarget::Field(field.id))
                .with_visibility(Visibility::Public)
                .with_return_type(holder_type.clone())
                .with_parameter(&field.name, field.ty.clone())
                .with_body(JavaBlock::new(vec![
                    JavaStmt::assign(JavaExpr::this_field(&field.name), JavaExpr::ident(&field.name)),
                    JavaStmt::Return(JavaExpr::This),
                ]))
                .build();
            holder = holder.with_method(setter);
        }

        let class_type = type_with_generics(class);
        let arguments = fields
            .iter()
            .map(|field| JavaExpr::this_field(&field.name))
            .collect();
        holder = holder.with_method(
            LightMethodBuilder::new(build_method_name(annotation), class.id, navigation)
                .with_visibility(Visibility::Public)
                .with_return_type(class_type.clone())
                .with_body(JavaBlock::returning(JavaExpr::new_instance(class_type, arguments)))
                .build(),
        );

        let label = format!("{}.{}", nested_class_name(cx.tree, class), holder_name);
        let rendered = fields.iter().enumerate().map(|(index, field)| {
            let separator = if index == 0 { "" } else { ", " };
            (format!("{}{}=", separator, field.name), JavaExpr::this_field(&field.name))
        });
        holder = holder.with_method(
            LightMethodBuilder::new("toString", class.id, navigation)
                .with_visibility(Visibility::Public)
                .with_return_type(JavaType::string())
                .with_body(JavaBlock::returning(string_template(&label, rendered)))
                .build(),
        );

        target.push(VirtualElement::Class(holder.build()));
    }
}

/// `"Label(" + "a=" + a + ", b=" + b + ")"` with adjacent literals merged.
pub(crate) fn string_template<I>(label: &str, parts: I) -> JavaExpr
where
    I: IntoIterator<Item = (String, JavaExpr)>,
{
    let mut pieces: Vec<JavaExpr> = Vec::new();
    let mut pending = format!("{}(", label);
    for (text, value) in parts {
        pending.push_str(&text);
        if !pending.is_empty() {
            pieces.push(JavaExpr::string(std::mem::take(&mut pending)));
        }
        pieces.push(value);
    }
    pending.push(')');
    pieces.push(JavaExpr::string(pending));
    JavaExpr::concat(pieces).unwrap_or_else(|| JavaExpr::string(""))
}
