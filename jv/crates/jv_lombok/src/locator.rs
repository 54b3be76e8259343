//! Finds marker annotations on declarations.

use crate::names::Marker;
use jv_lombok_ast::{Annotation, NodeId, SourceTree};

/// First annotation on `owner` matching `marker`.
pub fn find_annotation<'t>(
    tree: &'t SourceTree,
    owner: NodeId,
    marker: &Marker,
) -> Option<&'t Annotation> {
    tree.annotations_of(owner)
        .into_iter()
        .find(|annotation| marker.matches(annotation))
}

/// Every annotation on `owner` matching `marker`, in source order.
pub fn find_annotations<'t>(
    tree: &'t SourceTree,
    owner: NodeId,
    marker: &Marker,
) -> Vec<&'t Annotation> {
    tree.annotations_of(owner)
        .into_iter()
        .filter(|annotation| marker.matches(annotation))
        .collect()
}

pub fn is_annotated_with(tree: &SourceTree, owner: NodeId, marker: &Marker) -> bool {
    find_annotation(tree, owner, marker).is_some()
}
