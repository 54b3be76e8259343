//! Processors attached to field declarations.

mod wither;

pub use wither::{WitherFieldProcessor, second_wither_name, wither_name};
