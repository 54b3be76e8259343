//! Processors attached to class declarations.

mod builder;
mod builder_class;
mod constructor;
mod equals_hash;
mod to_string;

pub use builder::BuilderProcessor;
pub use builder_class::{
    BuilderClassProcessor, builder_class_name, builder_method_name, build_method_name,
};
pub use constructor::{AllArgsConstructorProcessor, create_all_args_constructor};
pub use equals_hash::EqualsAndHashCodeProcessor;
pub use to_string::ToStringProcessor;
