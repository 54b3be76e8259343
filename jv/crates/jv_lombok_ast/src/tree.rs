//! Arena-backed declaration tree with parent links.
//!
//! The tree is owned by the host and only read by the processors. Every node
//! knows its parent, which is what the owner lookup for annotations walks.

use crate::annotation::Annotation;
use crate::types::{JavaType, Modifiers, Span, simple_type_name};
use serde::{Deserialize, Serialize};

/// Stable index of a node inside a [`SourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Syntactic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Class,
    Field,
    Method,
    Parameter,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub id: NodeId,
    pub name: String,
    pub qualified_name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    pub super_class: Option<JavaType>,
    pub outer: Option<NodeId>,
    pub fields: Vec<NodeId>,
    pub methods: Vec<NodeId>,
    pub inner_classes: Vec<NodeId>,
    pub annotations: Vec<NodeId>,
    pub span: Span,
}

impl ClassDecl {
    /// `extends` clause other than `java.lang.Object`.
    pub fn has_explicit_super_class(&self) -> bool {
        match &self.super_class {
            Some(JavaType::Reference { name, .. }) => simple_type_name(name) != "Object",
            Some(_) => true,
            None => false,
        }
    }
}

/// Field initializer as far as the processors care about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInitializer {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub id: NodeId,
    pub name: String,
    pub ty: JavaType,
    pub modifiers: Modifiers,
    pub initializer: Option<FieldInitializer>,
    pub annotations: Vec<NodeId>,
    pub containing_class: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub id: NodeId,
    pub name: String,
    pub is_constructor: bool,
    pub return_type: Option<JavaType>,
    pub parameters: Vec<NodeId>,
    pub modifiers: Modifiers,
    pub annotations: Vec<NodeId>,
    pub containing_class: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub id: NodeId,
    pub name: String,
    pub ty: JavaType,
    pub annotations: Vec<NodeId>,
    pub method: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Class(ClassDecl),
    Field(FieldDecl),
    Method(MethodDecl),
    Parameter(ParameterDecl),
    Annotation(Annotation),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Class(_) => NodeKind::Class,
            NodeData::Field(_) => NodeKind::Field,
            NodeData::Method(_) => NodeKind::Method,
            NodeData::Parameter(_) => NodeKind::Parameter,
            NodeData::Annotation(_) => NodeKind::Annotation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub data: NodeData,
}

/// Upward navigation capability the processors rely on.
pub trait SyntaxTree {
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;
    fn kind_of(&self, id: NodeId) -> Option<NodeKind>;
}

/// Nearest strict ancestor of `start` whose kind is one of `kinds`.
///
/// Annotations are reachable from every enclosing declaration, so the walk
/// stops at the closest match; a field or method therefore always wins over
/// the class that contains it.
pub fn nearest_ancestor<T>(tree: &T, start: NodeId, kinds: &[NodeKind]) -> Option<NodeId>
where
    T: SyntaxTree + ?Sized,
{
    let mut current = tree.parent_of(start);
    while let Some(id) = current {
        if let Some(kind) = tree.kind_of(id) {
            if kinds.contains(&kind) {
                return Some(id);
            }
        }
        current = tree.parent_of(id);
    }
    None
}

/// Read-only declaration tree handed over by the host.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl SyntaxTree for SourceTree {
    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|node| node.data.kind())
    }
}

impl SourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn top_level_classes(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn class(&self, id: NodeId) -> Option<&ClassDecl> {
        match &self.node(id)?.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn field(&self, id: NodeId) -> Option<&FieldDecl> {
        match &self.node(id)?.data {
            NodeData::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn method(&self, id: NodeId) -> Option<&MethodDecl> {
        match &self.node(id)?.data {
            NodeData::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn parameter(&self, id: NodeId) -> Option<&ParameterDecl> {
        match &self.node(id)?.data {
            NodeData::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn annotation(&self, id: NodeId) -> Option<&Annotation> {
        match &self.node(id)?.data {
            NodeData::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }

    /// Annotations attached directly to a declaration node.
    pub fn annotations_of(&self, owner: NodeId) -> Vec<&Annotation> {
        let ids: &[NodeId] = match self.node(owner).map(|node| &node.data) {
            Some(NodeData::Class(class)) => &class.annotations,
            Some(NodeData::Field(field)) => &field.annotations,
            Some(NodeData::Method(method)) => &method.annotations,
            Some(NodeData::Parameter(parameter)) => &parameter.annotations,
            _ => &[],
        };
        ids.iter().filter_map(|id| self.annotation(*id)).collect()
    }

    pub fn fields_of<'a>(&'a self, class: &'a ClassDecl) -> impl Iterator<Item = &'a FieldDecl> + 'a {
        class.fields.iter().filter_map(move |id| self.field(*id))
    }

    pub fn methods_of<'a>(
        &'a self,
        class: &'a ClassDecl,
    ) -> impl Iterator<Item = &'a MethodDecl> + 'a {
        class.methods.iter().filter_map(move |id| self.method(*id))
    }

    pub fn inner_classes_of<'a>(
        &'a self,
        class: &'a ClassDecl,
    ) -> impl Iterator<Item = &'a ClassDecl> + 'a {
        class.inner_classes.iter().filter_map(move |id| self.class(*id))
    }

    pub fn parameters_of<'a>(
        &'a self,
        method: &'a MethodDecl,
    ) -> impl Iterator<Item = &'a ParameterDecl> + 'a {
        method.parameters.iter().filter_map(move |id| self.parameter(*id))
    }

    /// Every class in the tree, outer classes before their inner classes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.nodes.iter().filter_map(|node| match &node.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        })
    }

    /// Looks a class up by qualified name, falling back to its simple name.
    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes()
            .find(|class| class.qualified_name == name)
            .or_else(|| self.classes().find(|class| class.name == name))
    }

    pub(crate) fn push(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node { parent, data });
        if parent.is_none() {
            self.roots.push(id);
        }
        id
    }

    pub(crate) fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    pub(crate) fn class_mut(&mut self, id: NodeId) -> Option<&mut ClassDecl> {
        match &mut self.nodes.get_mut(id.index())?.data {
            NodeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub(crate) fn method_mut(&mut self, id: NodeId) -> Option<&mut MethodDecl> {
        match &mut self.nodes.get_mut(id.index())?.data {
            NodeData::Method(method) => Some(method),
            _ => None,
        }
    }

    pub(crate) fn field_mut(&mut self, id: NodeId) -> Option<&mut FieldDecl> {
        match &mut self.nodes.get_mut(id.index())?.data {
            NodeData::Field(field) => Some(field),
            _ => None,
        }
    }

    pub(crate) fn parameter_mut(&mut self, id: NodeId) -> Option<&mut ParameterDecl> {
        match &mut self.nodes.get_mut(id.index())?.data {
            NodeData::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }
}
