// jv_lombok - Annotation processors that synthesize virtual members
pub mod accessors;
pub mod config;
pub mod dispatch;
pub mod inspector;
pub mod locator;
pub mod names;
pub mod problem;
pub mod processor;
pub mod quickfix;
pub mod synth;

pub use accessors::AccessorsInfo;
pub use config::{AccessorDefaults, AugmentConfig, ConfigError, EqualsAndHashCodeSettings};
pub use dispatch::ProcessorRegistry;
pub use problem::{CollectingProblemSink, EmptyProblemSink, Problem, ProblemSeverity, ProblemSink};
pub use processor::{AttachmentKind, ClassProcessor, FieldProcessor, ProcessContext};
pub use quickfix::QuickFix;
pub use synth::{
    ElementKind, MemberKind, NavigationTarget, VirtualClass, VirtualElement, VirtualMember,
    render_elements,
};

#[cfg(test)]
mod tests;
