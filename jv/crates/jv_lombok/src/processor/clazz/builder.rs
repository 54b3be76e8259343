use super::builder_class::{builder_class_name, builder_method_name, validate_builder};
use super::constructor::create_all_args_constructor;
use crate::inspector::{
    collect_class_constructors, collect_class_methods, has_method_by_name, inner_class_by_name,
    type_with_generics,
};
use crate::names::{BUILDER, Marker};
use crate::problem::ProblemSink;
use crate::processor::{ClassProcessor, ProcessContext};
use crate::synth::{LightMethodBuilder, MemberKind, NavigationTarget, VirtualElement};
use jv_lombok_ast::{Annotation, ClassDecl, JavaType, Visibility};
use jv_lombok_codegen::{JavaBlock, JavaExpr};
use tracing::warn;

/// `@Builder` on a class: the static factory method, plus an all-arguments
/// constructor when the class declares none.
///
/// The holder class comes from [`super::BuilderClassProcessor`], which has to
/// run first for the same annotation.
#[derive(Debug, Default)]
pub struct BuilderProcessor;

impl ClassProcessor for BuilderProcessor {
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
        if collect_class_constructors(cx.tree, class).is_empty()
            && !has_generated_constructor(class, target)
        {
            target.extend(create_all_args_constructor(
                cx,
                class,
                Visibility::Package,
                annotation.id,
                None,
            ));
        }

        let holder_name = builder_class_name(annotation, class);
        let Some(holder_type) = holder_type(cx, class, &holder_name, target) else {
            warn!(
                class = %class.qualified_name,
                holder = %holder_name,
                "builder class missing; holder processor did not run first"
            );
            return;
        };

        let method_name = builder_method_name(annotation);
        let methods = collect_class_methods(cx.tree, class);
        if has_method_by_name(&methods, &method_name) {
            return;
        }

        let method = LightMethodBuilder::new(method_name, class.id, NavigationTarget::Annotation(annotation.id))
            .with_visibility(Visibility::Public)
            .with_static()
            .with_type_parameters(&class.type_parameters)
            .with_return_type(holder_type.clone())
            .with_body(JavaBlock::returning(JavaExpr::new_instance(holder_type, Vec::new())))
            .build();
        target.push(VirtualElement::Member(method));
    }
}

/// A constructor for `class` already produced in this call, e.g. by `@AllArgsConstructor`.
fn has_generated_constructor(class: &ClassDecl, produced: &[VirtualElement]) -> bool {
    produced
        .iter()
        .filter_map(VirtualElement::as_member)
        .any(|member| member.kind == MemberKind::Constructor && member.containing_class == class.id)
}

/// Declared holder class, or one generated earlier in the same call.
fn holder_type(
    cx: &ProcessContext<'_>,
    class: &ClassDecl,
    holder_name: &str,
    produced: &[VirtualElement],
) -> Option<JavaType> {
    if let Some(declared) = inner_class_by_name(cx.tree, class, holder_name) {
        return Some(type_with_generics(declared));
    }
    produced
        .iter()
        .filter_map(VirtualElement::as_class)
        .find(|holder| holder.containing_class == class.id && holder.name == holder_name)
        .map(|holder| {
            JavaType::generic(
                holder.qualified_name.clone(),
                holder
                    .type_parameters
                    .iter()
                    .map(|name| JavaType::type_variable(name.clone()))
                    .collect(),
            )
        })
}
