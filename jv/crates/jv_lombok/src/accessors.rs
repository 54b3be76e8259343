//! Accessor naming conventions (`@Accessors(prefix = ..., fluent = ...)`).

use crate::config::AccessorDefaults;
use crate::locator::find_annotation;
use crate::names::{ACCESSORS, capitalize, decapitalize};
use jv_lombok_ast::{Annotation, FieldDecl, SourceTree};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessorsInfo {
    pub fluent: bool,
    pub chain: bool,
    pub prefixes: Vec<String>,
}

impl AccessorsInfo {
    /// Resolution order: field annotation, then the containing classes from
    /// the innermost outward, then configured defaults.
    pub fn build(tree: &SourceTree, field: &FieldDecl, defaults: &AccessorDefaults) -> Self {
        if let Some(annotation) = find_annotation(tree, field.id, &ACCESSORS) {
            return Self::from_annotation(annotation, defaults);
        }

        let mut class_id = Some(field.containing_class);
        while let Some(id) = class_id {
            if let Some(annotation) = find_annotation(tree, id, &ACCESSORS) {
                return Self::from_annotation(annotation, defaults);
            }
            class_id = tree.class(id).and_then(|class| class.outer);
        }

        Self::from_defaults(defaults)
    }

    pub fn from_defaults(defaults: &AccessorDefaults) -> Self {
        Self {
            fluent: defaults.fluent,
            chain: defaults.chain,
            prefixes: defaults.prefix.clone(),
        }
    }

    fn from_annotation(annotation: &Annotation, defaults: &AccessorDefaults) -> Self {
        let fluent = annotation.bool_attribute_or("fluent", defaults.fluent);
        Self {
            fluent,
            // fluent accessors chain unless told otherwise
            chain: annotation.bool_attribute_or("chain", fluent || defaults.chain),
            prefixes: if annotation.has_attribute("prefix") {
                annotation.string_list_attribute("prefix")
            } else {
                defaults.prefix.clone()
            },
        }
    }

    /// Strips the first matching prefix and lower-cases the next character.
    ///
    /// A prefix ending in a letter only matches when followed by a
    /// non-lowercase character (`mName` matches `m`, `mode` does not). Names
    /// matching no prefix are returned unchanged.
    pub fn remove_prefix(&self, field_name: &str) -> String {
        for prefix in &self.prefixes {
            if prefix.is_empty() {
                return field_name.to_string();
            }
            let Some(rest) = field_name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let Some(next) = rest.chars().next() else {
                continue;
            };
            let ends_with_letter = prefix.chars().last().is_some_and(char::is_alphabetic);
            if ends_with_letter && next.is_lowercase() {
                continue;
            }
            return decapitalize(rest);
        }
        field_name.to_string()
    }

    /// Conventional getter name for `field` (`getName`, `isActive`, or the
    /// bare name for fluent accessors).
    pub fn getter_name(&self, field: &FieldDecl) -> String {
        let base = self.remove_prefix(&field.name);
        if self.fluent {
            return base;
        }
        if field.ty.is_boolean() {
            if has_is_prefix(&base) {
                return base;
            }
            return format!("is{}", capitalize(&base));
        }
        format!("get{}", capitalize(&base))
    }
}

/// `isActive` style boolean name: `is` followed by an upper-case letter.
pub fn has_is_prefix(name: &str) -> bool {
    name.strip_prefix("is")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}
