//! Suggested automatic fixes attached to problems.

use jv_lombok_ast::{Annotation, Modifier, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuickFix {
    /// Set `attribute` on `annotation` to the given source text, or drop the
    /// attribute when `value` is `None`.
    ChangeAnnotationParameter {
        annotation: NodeId,
        attribute: String,
        value: Option<String>,
    },
    /// Add (`value == true`) or remove a modifier keyword on a declaration.
    ChangeModifier {
        target: NodeId,
        modifier: Modifier,
        value: bool,
    },
}

impl QuickFix {
    pub fn change_annotation_parameter(
        annotation: &Annotation,
        attribute: &str,
        value: Option<String>,
    ) -> Self {
        QuickFix::ChangeAnnotationParameter {
            annotation: annotation.id,
            attribute: attribute.to_string(),
            value,
        }
    }

    pub fn modifier(target: NodeId, modifier: Modifier, value: bool) -> Self {
        QuickFix::ChangeModifier {
            target,
            modifier,
            value,
        }
    }

    /// Short label for fix menus.
    pub fn title(&self) -> String {
        match self {
            QuickFix::ChangeAnnotationParameter {
                attribute,
                value: Some(value),
                ..
            } => format!("Change '{}' to '{}'", attribute, value),
            QuickFix::ChangeAnnotationParameter {
                attribute,
                value: None,
                ..
            } => format!("Remove '{}' parameter", attribute),
            QuickFix::ChangeModifier {
                modifier,
                value: true,
                ..
            } => format!("Add '{}' modifier", modifier.keyword()),
            QuickFix::ChangeModifier {
                modifier,
                value: false,
                ..
            } => format!("Remove '{}' modifier", modifier.keyword()),
        }
    }
}
