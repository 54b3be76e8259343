//! Registry of processors and the entry points the host calls.

use crate::config::AugmentConfig;
use crate::names::Marker;
use crate::problem::{CollectingProblemSink, Problem, ProblemSink};
use crate::processor::{
    AllArgsConstructorProcessor, AttachmentKind, BuilderClassProcessor, BuilderProcessor,
    ClassProcessor, EqualsAndHashCodeProcessor, FieldProcessor, ProcessContext,
    ToStringProcessor, WitherFieldProcessor,
};
use crate::synth::{ElementKind, VirtualElement};
use jv_lombok_ast::{NodeId, NodeKind, SourceTree, SyntaxTree, nearest_ancestor};
use tracing::{debug, trace};

/// Owner kinds in the order an annotation's ancestors are tried.
const OWNER_KINDS: &[NodeKind] = &[NodeKind::Field, NodeKind::Method, NodeKind::Class];

enum Registered {
    Class(Box<dyn ClassProcessor>),
    Field(Box<dyn FieldProcessor>),
}

impl Registered {
    fn key(&self) -> &'static str {
        match self {
            Registered::Class(processor) => processor.key(),
            Registered::Field(processor) => processor.key(),
        }
    }

    fn marker(&self) -> &'static Marker {
        match self {
            Registered::Class(processor) => processor.marker(),
            Registered::Field(processor) => processor.marker(),
        }
    }

    fn attachment(&self) -> AttachmentKind {
        match self {
            Registered::Class(_) => AttachmentKind::Class,
            Registered::Field(_) => AttachmentKind::Field,
        }
    }
}

/// Processors keyed by (marker, attachment kind), run in registration order.
pub struct ProcessorRegistry {
    processors: Vec<Registered>,
    config: AugmentConfig,
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::with_config(AugmentConfig::default())
    }

    /// Registry with every built-in processor.
    pub fn with_config(config: AugmentConfig) -> Self {
        let mut registry = Self::empty(config);
        registry.register_class(Box::new(AllArgsConstructorProcessor));
        // the holder class has to exist before the factory method is built
        registry.register_class(Box::new(BuilderClassProcessor));
        registry.register_class(Box::new(BuilderProcessor));
        registry.register_class(Box::new(EqualsAndHashCodeProcessor));
        registry.register_class(Box::new(ToStringProcessor));
        registry.register_field(Box::new(WitherFieldProcessor));
        registry
    }

    pub fn empty(config: AugmentConfig) -> Self {
        Self {
            processors: Vec::new(),
            config,
        }
    }

    pub fn register_class(&mut self, processor: Box<dyn ClassProcessor>) {
        self.processors.push(Registered::Class(processor));
    }

    pub fn register_field(&mut self, processor: Box<dyn FieldProcessor>) {
        self.processors.push(Registered::Field(processor));
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// (config key, primary marker name, attachment) per registered processor.
    pub fn entries(&self) -> Vec<(&'static str, &'static str, AttachmentKind)> {
        self.processors
            .iter()
            .map(|entry| (entry.key(), entry.marker().primary_name(), entry.attachment()))
            .collect()
    }

    fn enabled(&self) -> impl Iterator<Item = &Registered> {
        self.processors
            .iter()
            .filter(|entry| self.config.is_enabled(entry.key()))
    }

    /// Every element generated for `class`: class processors on the class,
    /// then field processors on each declared field.
    pub fn process(&self, tree: &SourceTree, class: NodeId) -> Vec<VirtualElement> {
        let Some(class) = tree.class(class) else {
            return Vec::new();
        };
        let cx = ProcessContext::new(tree, &self.config);
        let mut target = Vec::new();
        for entry in self.enabled() {
            match entry {
                Registered::Class(processor) => processor.process(&cx, class, &mut target),
                Registered::Field(processor) => {
                    for field in tree.fields_of(class) {
                        processor.process(&cx, field, &mut target);
                    }
                }
            }
        }
        debug!(class = %class.qualified_name, generated = target.len(), "processed class");
        target
    }

    /// [`Self::process`] narrowed to one element kind.
    pub fn augment(&self, tree: &SourceTree, class: NodeId, kind: ElementKind) -> Vec<VirtualElement> {
        self.process(tree, class)
            .into_iter()
            .filter(|element| element.kind() == kind)
            .collect()
    }

    /// Annotations some enabled processor claims on `declaration`, valid or not.
    pub fn collect_processed_annotations(&self, tree: &SourceTree, declaration: NodeId) -> Vec<NodeId> {
        let mut found: Vec<NodeId> = Vec::new();
        for entry in self.enabled() {
            let annotations = match (entry, tree.kind_of(declaration)) {
                (Registered::Class(processor), Some(NodeKind::Class)) => tree
                    .class(declaration)
                    .map(|class| processor.collect_processed_annotations(tree, class))
                    .unwrap_or_default(),
                (Registered::Field(processor), Some(NodeKind::Field)) => tree
                    .field(declaration)
                    .map(|field| processor.collect_processed_annotations(tree, field))
                    .unwrap_or_default(),
                _ => Vec::new(),
            };
            for annotation in annotations {
                if !found.contains(&annotation.id) {
                    found.push(annotation.id);
                }
            }
        }
        found
    }

    /// Runs validation for `annotation` against its owning declaration.
    ///
    /// Returns `false` when no enabled processor claims the annotation.
    pub fn validate_annotation(
        &self,
        tree: &SourceTree,
        annotation: NodeId,
        sink: &mut dyn ProblemSink,
    ) -> bool {
        let Some(instance) = tree.annotation(annotation) else {
            return false;
        };
        let Some(owner) = nearest_ancestor(tree, annotation, OWNER_KINDS) else {
            return false;
        };
        let cx = ProcessContext::new(tree, &self.config);
        let mut claimed = false;
        let mut valid = true;
        for entry in self.enabled().filter(|entry| entry.marker().matches(instance)) {
            match (entry, tree.kind_of(owner)) {
                (Registered::Class(processor), Some(NodeKind::Class)) => {
                    if let Some(class) = tree.class(owner) {
                        claimed = true;
                        valid &= processor.validate(&cx, instance, class, sink);
                    }
                }
                (Registered::Field(processor), Some(NodeKind::Field)) => {
                    if let Some(field) = tree.field(owner) {
                        claimed = true;
                        valid &= processor.validate(&cx, instance, field, sink);
                    }
                }
                _ => {}
            }
        }
        trace!(%annotation, %owner, claimed, valid, "validated annotation");
        claimed && valid
    }

    /// Diagnostics path for one annotation. Processors sharing a marker
    /// report identical problems only once.
    pub fn verify_annotation(&self, tree: &SourceTree, annotation: NodeId) -> Vec<Problem> {
        let mut sink = CollectingProblemSink::new();
        self.validate_annotation(tree, annotation, &mut sink);
        let mut problems: Vec<Problem> = Vec::new();
        for problem in sink.into_problems() {
            if !problems.contains(&problem) {
                problems.push(problem);
            }
        }
        problems
    }

    /// Diagnostics for every processed annotation on the class and its fields.
    pub fn verify_class(&self, tree: &SourceTree, class: NodeId) -> Vec<Problem> {
        let Some(decl) = tree.class(class) else {
            return Vec::new();
        };
        let mut annotations = self.collect_processed_annotations(tree, class);
        for field in tree.fields_of(decl) {
            annotations.extend(self.collect_processed_annotations(tree, field.id));
        }
        annotations
            .into_iter()
            .flat_map(|annotation| self.verify_annotation(tree, annotation))
            .collect()
    }
}
