use crate::inspector::{constructor_fields, find_constructor_with_types, type_with_generics};
use crate::names::{ALL_ARGS_CONSTRUCTOR, Marker};
use crate::problem::ProblemSink;
use crate::processor::{ClassProcessor, ProcessContext, method_visibility};
use crate::synth::{LightMethodBuilder, NavigationTarget, VirtualElement};
use jv_lombok_ast::{Annotation, ClassDecl, ClassKind, JavaType, NodeId, Visibility};
use jv_lombok_codegen::{JavaBlock, JavaExpr, JavaStmt};

/// `@AllArgsConstructor`: one constructor parameter per eligible field.
#[derive(Debug, Default)]
pub struct AllArgsConstructorProcessor;

impl ClassProcessor for AllArgsConstructorProcessor {
    fn key(&self) -> &'static str {
        "all_args_constructor"
    }

    fn marker(&self) -> &'static Marker {
        &ALL_ARGS_CONSTRUCTOR
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
                format!(
                    "'@{}' is only supported on a class or enum type",
                    ALL_ARGS_CONSTRUCTOR.simple_name()
                ),
                Vec::new(),
            );
            return false;
        }
        if method_visibility(annotation, "access").is_none() {
            return false;
        }

        let fields = constructor_fields(cx.tree, class);
        let types: Vec<&JavaType> = fields.iter().map(|field| &field.ty).collect();
        if find_constructor_with_types(cx.tree, class, &types).is_some() {
            sink.add_error(
                format!("Constructor with {} parameters already defined", types.len()),
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
        let Some(visibility) = method_visibility(annotation, "access") else {
            return;
        };
        let static_name = annotation
            .string_attribute("staticName")
            .filter(|name| !name.trim().is_empty());
        target.extend(create_all_args_constructor(
            cx,
            class,
            visibility,
            annotation.id,
            static_name,
        ));
    }
}

/// All-arguments constructor for `class`, plus a static factory when
/// `static_name` is given (the constructor itself then becomes private).
/// Enum constructors are always private.
pub fn create_all_args_constructor(
    cx: &ProcessContext<'_>,
    class: &ClassDecl,
    visibility: Visibility,
    annotation: NodeId,
    static_name: Option<&str>,
) -> Vec<VirtualElement> {
    let navigation = NavigationTarget::Annotation(annotation);
    let fields = constructor_fields(cx.tree, class);

    let constructor_visibility = if static_name.is_some() || class.kind == ClassKind::Enum {
        Visibility::Private
    } else {
        visibility
    };

    let mut constructor = LightMethodBuilder::constructor(&class.name, class.id, navigation)
        .with_visibility(constructor_visibility);
    let mut assignments = Vec::with_capacity(fields.len());
    for field in &fields {
        constructor = constructor.with_final_parameter(&field.name, field.ty.clone());
        assignments.push(JavaStmt::assign(
            JavaExpr::this_field(&field.name),
            JavaExpr::ident(&field.name),
        ));
    }
    let mut elements = vec![VirtualElement::Member(
        constructor.with_body(JavaBlock::new(assignments)).build(),
    )];

    if let Some(static_name) = static_name {
        let class_type = type_with_generics(class);
        let arguments = fields.iter().map(|field| JavaExpr::ident(&field.name)).collect();
        let mut factory = LightMethodBuilder::new(static_name, class.id, navigation)
            .with_visibility(visibility)
            .with_static()
            .with_type_parameters(&class.type_parameters)
            .with_return_type(class_type.clone());
        for field in &fields {
            factory = factory.with_final_parameter(&field.name, field.ty.clone());
        }
        let body = JavaBlock::returning(JavaExpr::new_instance(class_type, arguments));
        elements.push(VirtualElement::Member(factory.with_body(body).build()));
    }

    elements
}
