use serde::{Deserialize, Serialize};

/// Source location information
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn dummy() -> Self {
        Self::default()
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Number(String), // Keep as string for precision
    Boolean(bool),
    Null,
    Character(char),
}

/// Java type as seen by the host model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JavaType {
    /// Primitive types: int, boolean, char, etc.
    Primitive(String),
    /// Reference types: String, Object, custom classes
    Reference {
        name: String,
        #[serde(default)]
        generic_args: Vec<JavaType>,
    },
    /// Array types: int[], String[][]
    Array {
        element_type: Box<JavaType>,
        dimensions: usize,
    },
    /// Type variable declared by the enclosing class or method (`T`).
    TypeVariable(String),
    /// Wildcard generic (e.g., `? extends Number`).
    Wildcard {
        kind: JavaWildcardKind,
        #[serde(default)]
        bound: Option<Box<JavaType>>,
    },
    /// Void type
    Void,
}

/// Variance kind for Java wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JavaWildcardKind {
    Unbounded,
    Extends,
    Super,
}

const PRIMITIVE_NAMES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

impl JavaType {
    pub fn primitive(name: &str) -> Self {
        JavaType::Primitive(name.to_string())
    }

    pub fn int() -> Self {
        Self::primitive("int")
    }

    pub fn boolean() -> Self {
        Self::primitive("boolean")
    }

    pub fn reference(name: impl Into<String>) -> Self {
        JavaType::Reference {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, generic_args: Vec<JavaType>) -> Self {
        JavaType::Reference {
            name: name.into(),
            generic_args,
        }
    }

    pub fn array(element: JavaType, dimensions: usize) -> Self {
        JavaType::Array {
            element_type: Box::new(element),
            dimensions: dimensions.max(1),
        }
    }

    pub fn type_variable(name: impl Into<String>) -> Self {
        JavaType::TypeVariable(name.into())
    }

    pub fn string() -> Self {
        Self::reference("java.lang.String")
    }

    pub fn object() -> Self {
        Self::reference("java.lang.Object")
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(name) if PRIMITIVE_NAMES.contains(&name.as_str()))
    }

    /// Returns the primitive keyword when this is a primitive type.
    pub fn primitive_name(&self) -> Option<&str> {
        match self {
            JavaType::Primitive(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.primitive_name() == Some("boolean")
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JavaType::Array { .. })
    }

    /// Arrays whose element is itself an array or a reference need a deep comparison.
    pub fn is_object_array(&self) -> bool {
        match self {
            JavaType::Array {
                element_type,
                dimensions,
            } => *dimensions > 1 || !element_type.is_primitive(),
            _ => false,
        }
    }

    /// Fully spelled type text as a Java compiler would print it.
    pub fn canonical_text(&self) -> String {
        match self {
            JavaType::Primitive(name) => name.clone(),
            JavaType::Reference { name, generic_args } => {
                if generic_args.is_empty() {
                    name.clone()
                } else {
                    let args: Vec<String> = generic_args.iter().map(|arg| arg.canonical_text()).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            JavaType::Array {
                element_type,
                dimensions,
            } => format!("{}{}", element_type.canonical_text(), "[]".repeat(*dimensions)),
            JavaType::TypeVariable(name) => name.clone(),
            JavaType::Wildcard { kind, bound } => match (kind, bound) {
                (JavaWildcardKind::Unbounded, _) | (_, None) => "?".to_string(),
                (JavaWildcardKind::Extends, Some(bound)) => {
                    format!("? extends {}", bound.canonical_text())
                }
                (JavaWildcardKind::Super, Some(bound)) => {
                    format!("? super {}", bound.canonical_text())
                }
            },
            JavaType::Void => "void".to_string(),
        }
    }

    /// Type equivalence used when matching constructor parameters against fields.
    ///
    /// A reference written with its simple name is considered the same type as
    /// the qualified spelling (`String` vs `java.lang.String`), because the
    /// host model does not always resolve imports before handing us the tree.
    pub fn is_equivalent_to(&self, other: &JavaType) -> bool {
        match (self, other) {
            (JavaType::Primitive(a), JavaType::Primitive(b)) => a == b,
            (
                JavaType::Reference {
                    name: left,
                    generic_args: left_args,
                },
                JavaType::Reference {
                    name: right,
                    generic_args: right_args,
                },
            ) => {
                names_match(left, right)
                    && left_args.len() == right_args.len()
                    && left_args
                        .iter()
                        .zip(right_args)
                        .all(|(a, b)| a.is_equivalent_to(b))
            }
            (
                JavaType::Array {
                    element_type: left,
                    dimensions: left_dims,
                },
                JavaType::Array {
                    element_type: right,
                    dimensions: right_dims,
                },
            ) => left_dims == right_dims && left.is_equivalent_to(right),
            (JavaType::TypeVariable(a), JavaType::TypeVariable(b)) => a == b,
            (
                JavaType::Wildcard {
                    kind: left_kind,
                    bound: left_bound,
                },
                JavaType::Wildcard {
                    kind: right_kind,
                    bound: right_bound,
                },
            ) => {
                left_kind == right_kind
                    && match (left_bound, right_bound) {
                        (Some(a), Some(b)) => a.is_equivalent_to(b),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (JavaType::Void, JavaType::Void) => true,
            _ => false,
        }
    }
}

fn names_match(left: &str, right: &str) -> bool {
    if left == right {
        return true;
    }
    let left_qualified = left.contains('.');
    let right_qualified = right.contains('.');
    if left_qualified == right_qualified {
        return false;
    }
    simple_type_name(left) == simple_type_name(right)
}

/// Last segment of a dotted type name.
pub fn simple_type_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Java visibility modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package, // Default (no modifier)
    Private,
}

impl Visibility {
    /// Source keyword, empty for package-private.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Package => "",
            Visibility::Private => "private",
        }
    }
}

/// Individual modifier keywords addressable by quick fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Static,
    Final,
    Transient,
    Abstract,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Abstract => "abstract",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Modifiers {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_transient: bool,
    #[serde(default)]
    pub is_abstract: bool,
}

impl Modifiers {
    pub fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Static => self.is_static,
            Modifier::Final => self.is_final,
            Modifier::Transient => self.is_transient,
            Modifier::Abstract => self.is_abstract,
        }
    }

    /// Space separated keyword list in canonical Java order.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if !self.visibility.keyword().is_empty() {
            parts.push(self.visibility.keyword());
        }
        if self.is_abstract {
            parts.push("abstract");
        }
        if self.is_static {
            parts.push("static");
        }
        if self.is_final {
            parts.push("final");
        }
        if self.is_transient {
            parts.push("transient");
        }
        parts.join(" ")
    }
}
