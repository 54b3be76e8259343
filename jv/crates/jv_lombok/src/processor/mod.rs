//! Processor capability traits and the built-in processors.
//!
//! A processor binds one marker annotation to a validation routine and a
//! synthesis routine. Synthesis only ever runs after validation of the same
//! annotation instance returned `true`.

pub mod clazz;
pub mod field;
pub mod support;

use crate::config::AugmentConfig;
use crate::locator::find_annotation;
use crate::names::Marker;
use crate::problem::{EmptyProblemSink, ProblemSink};
use crate::synth::VirtualElement;
use jv_lombok_ast::{Annotation, ClassDecl, FieldDecl, SourceTree, Visibility};
use serde::Serialize;

pub use clazz::{
    AllArgsConstructorProcessor, BuilderClassProcessor, BuilderProcessor,
    EqualsAndHashCodeProcessor, ToStringProcessor,
};
pub use field::WitherFieldProcessor;

/// Syntactic category a processor attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Class,
    Field,
}

/// Read-only inputs shared by every processor call.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext<'a> {
    pub tree: &'a SourceTree,
    pub config: &'a AugmentConfig,
}

impl<'a> ProcessContext<'a> {
    pub fn new(tree: &'a SourceTree, config: &'a AugmentConfig) -> Self {
        Self { tree, config }
    }
}

pub trait ClassProcessor: Send + Sync {
    /// Configuration key under `[processors]`.
    fn key(&self) -> &'static str;

    fn marker(&self) -> &'static Marker;

    fn validate(
        &self,
        cx: &ProcessContext<'_>,
        annotation: &Annotation,
        class: &ClassDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool;

    /// Appends generated elements to `target`. Elements already in `target`
    /// were produced earlier in the same call by other processors.
    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        class: &ClassDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    );

    /// Generation path: locate, validate silently, synthesize.
    fn process(&self, cx: &ProcessContext<'_>, class: &ClassDecl, target: &mut Vec<VirtualElement>) {
        let Some(annotation) = find_annotation(cx.tree, class.id, self.marker()) else {
            return;
        };
        if self.validate(cx, annotation, class, &mut EmptyProblemSink) {
            self.synthesize(cx, class, annotation, target);
        }
    }

    fn collect_processed_annotations<'t>(
        &self,
        tree: &'t SourceTree,
        class: &ClassDecl,
    ) -> Vec<&'t Annotation> {
        find_annotation(tree, class.id, self.marker())
            .into_iter()
            .collect()
    }
}

pub trait FieldProcessor: Send + Sync {
    fn key(&self) -> &'static str;

    fn marker(&self) -> &'static Marker;

    fn validate(
        &self,
        cx: &ProcessContext<'_>,
        annotation: &Annotation,
        field: &FieldDecl,
        sink: &mut dyn ProblemSink,
    ) -> bool;

    fn synthesize(
        &self,
        cx: &ProcessContext<'_>,
        field: &FieldDecl,
        annotation: &Annotation,
        target: &mut Vec<VirtualElement>,
    );

    fn process(&self, cx: &ProcessContext<'_>, field: &FieldDecl, target: &mut Vec<VirtualElement>) {
        let Some(annotation) = find_annotation(cx.tree, field.id, self.marker()) else {
            return;
        };
        if self.validate(cx, annotation, field, &mut EmptyProblemSink) {
            self.synthesize(cx, field, annotation, target);
        }
    }

    fn collect_processed_annotations<'t>(
        &self,
        tree: &'t SourceTree,
        field: &FieldDecl,
    ) -> Vec<&'t Annotation> {
        find_annotation(tree, field.id, self.marker())
            .into_iter()
            .collect()
    }
}

/// Visibility requested through an `AccessLevel` attribute.
///
/// Omitted means public. `AccessLevel.NONE` and unknown constants yield
/// `None`, which processors treat as "generate nothing".
pub fn method_visibility(annotation: &Annotation, attribute: &str) -> Option<Visibility> {
    if !annotation.has_attribute(attribute) {
        return Some(Visibility::Public);
    }
    match annotation.enum_attribute(attribute)? {
        "PUBLIC" => Some(Visibility::Public),
        "PROTECTED" => Some(Visibility::Protected),
        "PACKAGE" | "MODULE" => Some(Visibility::Package),
        "PRIVATE" => Some(Visibility::Private),
        _ => None,
    }
}
