// jv_lombok_ast - Declaration tree consumed by the lombok processors
pub mod annotation;
pub mod model;
pub mod tree;
pub mod types;

pub use annotation::*;
pub use model::*;
pub use tree::*;
pub use types::*;
