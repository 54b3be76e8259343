//! Marker annotations and naming conventions shared by the processors.

use jv_lombok_ast::{Annotation, simple_type_name};

/// Prefix lombok reserves for its own synthetic fields (`$lock`, `$hashCodeCache`).
pub const LOMBOK_INTERN_FIELD_MARKER: &str = "$";

pub fn is_intern_field(name: &str) -> bool {
    name.starts_with(LOMBOK_INTERN_FIELD_MARKER)
}

/// A code generation marker identified by its qualified name(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Accepted spellings; the first one is used in messages.
    pub qualified_names: &'static [&'static str],
}

impl Marker {
    pub const fn new(qualified_names: &'static [&'static str]) -> Self {
        Self { qualified_names }
    }

    pub fn primary_name(&self) -> &'static str {
        self.qualified_names.first().copied().unwrap_or("")
    }

    pub fn simple_name(&self) -> &'static str {
        simple_type_name(self.primary_name())
    }

    /// Qualified spelling matches, or an unqualified spelling matches the simple name.
    pub fn matches(&self, annotation: &Annotation) -> bool {
        if annotation.name.is_qualified() {
            let qualified = annotation.qualified_name();
            self.qualified_names.iter().any(|name| *name == qualified)
        } else {
            let simple = annotation.name.simple_name();
            self.qualified_names
                .iter()
                .any(|name| simple_type_name(name) == simple)
        }
    }

    /// Name shown in diagnostics for a concrete occurrence.
    pub fn display_name(&self, annotation: &Annotation) -> String {
        if annotation.name.is_qualified() {
            annotation.qualified_name()
        } else {
            self.primary_name().to_string()
        }
    }
}

pub const WITHER: Marker = Marker::new(&["lombok.experimental.Wither", "lombok.With"]);
pub const BUILDER: Marker = Marker::new(&["lombok.Builder", "lombok.experimental.Builder"]);
pub const ALL_ARGS_CONSTRUCTOR: Marker = Marker::new(&["lombok.AllArgsConstructor"]);
pub const REQUIRED_ARGS_CONSTRUCTOR: Marker = Marker::new(&["lombok.RequiredArgsConstructor"]);
pub const EQUALS_AND_HASH_CODE: Marker = Marker::new(&["lombok.EqualsAndHashCode"]);
pub const TO_STRING: Marker = Marker::new(&["lombok.ToString"]);
pub const NON_NULL: Marker = Marker::new(&["lombok.NonNull"]);
pub const ACCESSORS: Marker = Marker::new(&["lombok.experimental.Accessors"]);

/// Annotation families copied from a source field onto generated members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyableAnnotation {
    NonNull,
    Nullable,
    Deprecated,
}

/// Lower-cased simple names per family, matched case-insensitively.
const COPYABLE_ENTRIES: &[(CopyableAnnotation, &[&str])] = &[
    (CopyableAnnotation::NonNull, &["nonnull", "notnull"]),
    (CopyableAnnotation::Nullable, &["nullable", "checkfornull"]),
    (CopyableAnnotation::Deprecated, &["deprecated"]),
];

impl CopyableAnnotation {
    pub const ALL: [CopyableAnnotation; 3] = [
        CopyableAnnotation::NonNull,
        CopyableAnnotation::Nullable,
        CopyableAnnotation::Deprecated,
    ];

    pub fn matches(self, annotation: &Annotation) -> bool {
        let simple = annotation.name.simple_name().to_ascii_lowercase();
        COPYABLE_ENTRIES
            .iter()
            .filter(|(family, _)| *family == self)
            .any(|(_, names)| names.contains(&simple.as_str()))
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
