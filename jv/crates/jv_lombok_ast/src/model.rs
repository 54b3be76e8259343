//! Serializable description of source declarations and its lowering into a
//! [`SourceTree`].

use crate::annotation::{Annotation, AnnotationArgument, AnnotationName, AnnotationValue};
use crate::tree::{
    ClassDecl, ClassKind, FieldDecl, FieldInitializer, MethodDecl, NodeData, NodeId,
    ParameterDecl, SourceTree,
};
use crate::types::{JavaType, Modifiers, Span, Visibility};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("{kind} declaration without a name")]
    EmptyName { kind: &'static str },
    #[error("'{name}' is not a valid Java identifier")]
    InvalidIdentifier { name: String },
    #[error("field '{field}' is declared twice in class '{class}'")]
    DuplicateField { class: String, field: String },
    #[error("annotation without a name on '{owner}'")]
    EmptyAnnotationName { owner: String },
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

/// Java identifier check used for declaration names and generated names.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$') {
        return false;
    }
    !JAVA_KEYWORDS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationModel {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
}

impl AnnotationModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with(mut self, attribute: &str, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument::named(attribute, value));
        self
    }

    pub fn with_value(mut self, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument::positional(value));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub initializer: Option<FieldInitializer>,
    #[serde(default)]
    pub annotations: Vec<AnnotationModel>,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::with_visibility(Visibility::Private),
            initializer: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.modifiers.is_final = true;
        self
    }

    pub fn with_transient(mut self) -> Self {
        self.modifiers.is_transient = true;
        self
    }

    pub fn with_initializer(mut self, text: impl Into<String>) -> Self {
        self.initializer = Some(FieldInitializer { text: text.into() });
        self
    }

    pub fn annotated(mut self, annotation: AnnotationModel) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub annotations: Vec<AnnotationModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub return_type: Option<JavaType>,
    #[serde(default)]
    pub parameters: Vec<ParameterModel>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<AnnotationModel>,
}

impl MethodModel {
    pub fn method(name: impl Into<String>, return_type: JavaType) -> Self {
        Self {
            name: name.into(),
            constructor: false,
            return_type: Some(return_type),
            parameters: Vec::new(),
            modifiers: Modifiers::with_visibility(Visibility::Public),
            annotations: Vec::new(),
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            name: class_name.into(),
            constructor: true,
            return_type: None,
            parameters: Vec::new(),
            modifiers: Modifiers::with_visibility(Visibility::Public),
            annotations: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: JavaType) -> Self {
        self.parameters.push(ParameterModel {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        });
        self
    }

    pub fn with_annotated_parameter(
        mut self,
        name: impl Into<String>,
        ty: JavaType,
        annotation: AnnotationModel,
    ) -> Self {
        self.parameters.push(ParameterModel {
            name: name.into(),
            ty,
            annotations: vec![annotation],
        });
        self
    }

    pub fn annotated(mut self, annotation: AnnotationModel) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub super_class: Option<JavaType>,
    #[serde(default)]
    pub annotations: Vec<AnnotationModel>,
    #[serde(default)]
    pub fields: Vec<FieldModel>,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
    #[serde(default)]
    pub inner_classes: Vec<ClassModel>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            kind: ClassKind::Class,
            modifiers: Modifiers::with_visibility(Visibility::Public),
            type_parameters: Vec::new(),
            super_class: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn extending(mut self, super_class: JavaType) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn annotated(mut self, annotation: AnnotationModel) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_inner_class(mut self, inner: ClassModel) -> Self {
        self.inner_classes.push(inner);
        self
    }
}

/// Root object of the JSON input format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourceFileModel {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassModel>,
}

impl SourceTree {
    pub fn from_file(file: &SourceFileModel) -> Result<Self, TreeError> {
        let mut tree = SourceTree::new();
        for class in &file.classes {
            let package = class.package.as_deref().or(file.package.as_deref());
            lower_class(&mut tree, class, None, package)?;
        }
        Ok(tree)
    }

    pub fn from_models(classes: &[ClassModel]) -> Result<Self, TreeError> {
        let mut tree = SourceTree::new();
        for class in classes {
            lower_class(&mut tree, class, None, class.package.as_deref())?;
        }
        Ok(tree)
    }
}

fn check_identifier(name: &str, kind: &'static str) -> Result<(), TreeError> {
    if name.trim().is_empty() {
        return Err(TreeError::EmptyName { kind });
    }
    if !is_java_identifier(name) {
        return Err(TreeError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn lower_class(
    tree: &mut SourceTree,
    model: &ClassModel,
    outer: Option<(NodeId, String)>,
    package: Option<&str>,
) -> Result<NodeId, TreeError> {
    check_identifier(&model.name, "class")?;

    let qualified_name = match (&outer, package) {
        (Some((_, outer_name)), _) => format!("{}.{}", outer_name, model.name),
        (None, Some(package)) if !package.is_empty() => format!("{}.{}", package, model.name),
        _ => model.name.clone(),
    };

    let id = tree.next_id();
    tree.push(
        outer.as_ref().map(|(outer_id, _)| *outer_id),
        NodeData::Class(ClassDecl {
            id,
            name: model.name.clone(),
            qualified_name: qualified_name.clone(),
            kind: model.kind,
            modifiers: model.modifiers.clone(),
            type_parameters: model.type_parameters.clone(),
            super_class: model.super_class.clone(),
            outer: outer.as_ref().map(|(outer_id, _)| *outer_id),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
            annotations: Vec::new(),
            span: Span::dummy(),
        }),
    );

    let annotations = lower_annotations(tree, id, &model.annotations, &model.name)?;
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(model.fields.len());
    for field in &model.fields {
        check_identifier(&field.name, "field")?;
        if !seen.insert(field.name.as_str()) {
            return Err(TreeError::DuplicateField {
                class: model.name.clone(),
                field: field.name.clone(),
            });
        }
        fields.push(lower_field(tree, id, field)?);
    }

    let mut methods = Vec::with_capacity(model.methods.len());
    for method in &model.methods {
        methods.push(lower_method(tree, id, method)?);
    }

    let mut inner_classes = Vec::with_capacity(model.inner_classes.len());
    for inner in &model.inner_classes {
        inner_classes.push(lower_class(
            tree,
            inner,
            Some((id, qualified_name.clone())),
            package,
        )?);
    }

    if let Some(class) = tree.class_mut(id) {
        class.annotations = annotations;
        class.fields = fields;
        class.methods = methods;
        class.inner_classes = inner_classes;
    }
    Ok(id)
}

fn lower_field(
    tree: &mut SourceTree,
    class: NodeId,
    model: &FieldModel,
) -> Result<NodeId, TreeError> {
    let id = tree.next_id();
    tree.push(
        Some(class),
        NodeData::Field(FieldDecl {
            id,
            name: model.name.clone(),
            ty: model.ty.clone(),
            modifiers: model.modifiers.clone(),
            initializer: model.initializer.clone(),
            annotations: Vec::new(),
            containing_class: class,
            span: Span::dummy(),
        }),
    );
    let annotations = lower_annotations(tree, id, &model.annotations, &model.name)?;
    if let Some(field) = tree.field_mut(id) {
        field.annotations = annotations;
    }
    Ok(id)
}

fn lower_method(
    tree: &mut SourceTree,
    class: NodeId,
    model: &MethodModel,
) -> Result<NodeId, TreeError> {
    check_identifier(&model.name, "method")?;
    let id = tree.next_id();
    tree.push(
        Some(class),
        NodeData::Method(MethodDecl {
            id,
            name: model.name.clone(),
            is_constructor: model.constructor,
            return_type: model.return_type.clone(),
            parameters: Vec::new(),
            modifiers: model.modifiers.clone(),
            annotations: Vec::new(),
            containing_class: class,
            span: Span::dummy(),
        }),
    );
    let annotations = lower_annotations(tree, id, &model.annotations, &model.name)?;

    let mut parameters = Vec::with_capacity(model.parameters.len());
    for parameter in &model.parameters {
        check_identifier(&parameter.name, "parameter")?;
        let parameter_id = tree.next_id();
        tree.push(
            Some(id),
            NodeData::Parameter(ParameterDecl {
                id: parameter_id,
                name: parameter.name.clone(),
                ty: parameter.ty.clone(),
                annotations: Vec::new(),
                method: id,
            }),
        );
        let parameter_annotations =
            lower_annotations(tree, parameter_id, &parameter.annotations, &parameter.name)?;
        if let Some(lowered) = tree.parameter_mut(parameter_id) {
            lowered.annotations = parameter_annotations;
        }
        parameters.push(parameter_id);
    }

    if let Some(method) = tree.method_mut(id) {
        method.annotations = annotations;
        method.parameters = parameters;
    }
    Ok(id)
}

fn lower_annotations(
    tree: &mut SourceTree,
    owner: NodeId,
    models: &[AnnotationModel],
    owner_name: &str,
) -> Result<Vec<NodeId>, TreeError> {
    let mut ids = Vec::with_capacity(models.len());
    for model in models {
        let name = AnnotationName::parse(&model.name);
        if name.segments.is_empty() {
            return Err(TreeError::EmptyAnnotationName {
                owner: owner_name.to_string(),
            });
        }
        let id = tree.next_id();
        tree.push(
            Some(owner),
            NodeData::Annotation(Annotation {
                id,
                name,
                arguments: model.arguments.clone(),
                span: Span::dummy(),
            }),
        );
        ids.push(id);
    }
    Ok(ids)
}
