//! Virtual member construction.
//!
//! Every element built here is transient: it is allocated for one host query
//! and carries a navigation target pointing back at the declaration or
//! annotation that caused it.

use crate::names::CopyableAnnotation;
use jv_lombok_ast::{JavaType, Modifiers, NodeId, SourceTree, Visibility};
use jv_lombok_codegen::{JavaBlock, JavaSourceBuilder, emit_block, render_annotation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Method,
    Constructor,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Constructor,
}

/// Where "go to declaration" on a virtual element lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    Annotation(NodeId),
    Field(NodeId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualParameter {
    pub name: String,
    pub ty: JavaType,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualMember {
    pub kind: MemberKind,
    pub name: String,
    /// `None` for constructors.
    pub return_type: Option<JavaType>,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<VirtualParameter>,
    pub body: Option<JavaBlock>,
    pub containing_class: NodeId,
    pub navigation: NavigationTarget,
    /// Annotations copied onto the member, as source text without the `@`.
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualField {
    pub name: String,
    pub ty: JavaType,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualClass {
    pub name: String,
    pub qualified_name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<String>,
    pub containing_class: NodeId,
    pub navigation: NavigationTarget,
    pub fields: Vec<VirtualField>,
    pub methods: Vec<VirtualMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum VirtualElement {
    Member(VirtualMember),
    Class(VirtualClass),
}

impl VirtualElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            VirtualElement::Member(member) => match member.kind {
                MemberKind::Method => ElementKind::Method,
                MemberKind::Constructor => ElementKind::Constructor,
            },
            VirtualElement::Class(_) => ElementKind::Class,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VirtualElement::Member(member) => &member.name,
            VirtualElement::Class(class) => &class.name,
        }
    }

    pub fn as_member(&self) -> Option<&VirtualMember> {
        match self {
            VirtualElement::Member(member) => Some(member),
            VirtualElement::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&VirtualClass> {
        match self {
            VirtualElement::Class(class) => Some(class),
            VirtualElement::Member(_) => None,
        }
    }

    pub fn to_java_source(&self) -> String {
        let mut builder = JavaSourceBuilder::default();
        match self {
            VirtualElement::Member(member) => emit_member(&mut builder, member),
            VirtualElement::Class(class) => emit_class(&mut builder, class),
        }
        builder.build()
    }
}

impl VirtualMember {
    /// Signature line without body, e.g. `public Point withX(int x)`.
    pub fn signature(&self) -> String {
        let mut parts = Vec::new();
        let modifiers = self.modifiers.render();
        if !modifiers.is_empty() {
            parts.push(modifiers);
        }
        if !self.type_parameters.is_empty() {
            parts.push(format!("<{}>", self.type_parameters.join(", ")));
        }
        if let Some(return_type) = &self.return_type {
            parts.push(return_type.canonical_text());
        }
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|parameter| {
                let prefix = if parameter.is_final { "final " } else { "" };
                format!("{}{} {}", prefix, parameter.ty.canonical_text(), parameter.name)
            })
            .collect();
        parts.push(format!("{}({})", self.name, parameters.join(", ")));
        parts.join(" ")
    }

    pub fn to_java_source(&self) -> String {
        let mut builder = JavaSourceBuilder::default();
        emit_member(&mut builder, self);
        builder.build()
    }
}

fn emit_member(builder: &mut JavaSourceBuilder, member: &VirtualMember) {
    for annotation in &member.annotations {
        builder.push_line(&format!("@{}", annotation));
    }
    match &member.body {
        Some(body) => {
            builder.push_line(&format!("{} {{", member.signature()));
            builder.indent();
            emit_block(builder, body);
            builder.dedent();
            builder.push_line("}");
        }
        None => builder.push_line(&format!("{};", member.signature())),
    }
}

fn emit_class(builder: &mut JavaSourceBuilder, class: &VirtualClass) {
    let mut head = class.modifiers.render();
    if !head.is_empty() {
        head.push(' ');
    }
    head.push_str("class ");
    head.push_str(&class.name);
    if !class.type_parameters.is_empty() {
        head.push_str(&format!("<{}>", class.type_parameters.join(", ")));
    }
    builder.push_line(&format!("{} {{", head));
    builder.indent();
    for field in &class.fields {
        let modifiers = field.modifiers.render();
        let prefix = if modifiers.is_empty() {
            String::new()
        } else {
            format!("{} ", modifiers)
        };
        builder.push_line(&format!("{}{} {};", prefix, field.ty.canonical_text(), field.name));
    }
    for method in &class.methods {
        emit_member(builder, method);
    }
    builder.dedent();
    builder.push_line("}");
}

/// Fluent construction of a [`VirtualMember`].
#[derive(Debug, Clone)]
pub struct LightMethodBuilder {
    member: VirtualMember,
}

impl LightMethodBuilder {
    pub fn new(name: impl Into<String>, containing_class: NodeId, navigation: NavigationTarget) -> Self {
        Self {
            member: VirtualMember {
                kind: MemberKind::Method,
                name: name.into(),
                return_type: None,
                modifiers: Modifiers::default(),
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                body: None,
                containing_class,
                navigation,
                annotations: Vec::new(),
            },
        }
    }

    pub fn constructor(
        class_name: impl Into<String>,
        containing_class: NodeId,
        navigation: NavigationTarget,
    ) -> Self {
        let mut builder = Self::new(class_name, containing_class, navigation);
        builder.member.kind = MemberKind::Constructor;
        builder
    }

    pub fn with_return_type(mut self, return_type: JavaType) -> Self {
        self.member.return_type = Some(return_type);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.member.modifiers.visibility = visibility;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.member.modifiers.is_static = true;
        self
    }

    pub fn with_type_parameters(mut self, names: &[String]) -> Self {
        self.member.type_parameters = names.to_vec();
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: JavaType) -> Self {
        self.member.parameters.push(VirtualParameter {
            name: name.into(),
            ty,
            is_final: false,
        });
        self
    }

    pub fn with_final_parameter(mut self, name: impl Into<String>, ty: JavaType) -> Self {
        self.member.parameters.push(VirtualParameter {
            name: name.into(),
            ty,
            is_final: true,
        });
        self
    }

    pub fn with_body(mut self, body: JavaBlock) -> Self {
        self.member.body = Some(body);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<String>) -> Self {
        self.member.annotations.extend(annotations);
        self
    }

    pub fn build(self) -> VirtualMember {
        self.member
    }
}

/// Fluent construction of a [`VirtualClass`].
#[derive(Debug, Clone)]
pub struct LightClassBuilder {
    class: VirtualClass,
}

impl LightClassBuilder {
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        containing_class: NodeId,
        navigation: NavigationTarget,
    ) -> Self {
        Self {
            class: VirtualClass {
                name: name.into(),
                qualified_name: qualified_name.into(),
                modifiers: Modifiers::default(),
                type_parameters: Vec::new(),
                containing_class,
                navigation,
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.class.modifiers = modifiers;
        self
    }

    pub fn with_type_parameters(mut self, names: &[String]) -> Self {
        self.class.type_parameters = names.to_vec();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: JavaType, modifiers: Modifiers) -> Self {
        self.class.fields.push(VirtualField {
            name: name.into(),
            ty,
            modifiers,
        });
        self
    }

    pub fn with_method(mut self, method: VirtualMember) -> Self {
        self.class.methods.push(method);
        self
    }

    pub fn build(self) -> VirtualClass {
        self.class
    }
}

/// Annotations on `source` that belong to one of the given families, as source
/// text with their arguments, in source order.
pub fn copy_annotations(
    tree: &SourceTree,
    source: NodeId,
    families: &[CopyableAnnotation],
) -> Vec<String> {
    tree.annotations_of(source)
        .into_iter()
        .filter(|annotation| families.iter().any(|family| family.matches(annotation)))
        .map(render_annotation)
        .collect()
}

/// Java stubs for a list of elements, separated by blank lines.
pub fn render_elements(elements: &[VirtualElement]) -> String {
    elements
        .iter()
        .map(VirtualElement::to_java_source)
        .collect::<Vec<_>>()
        .join("\n")
}
