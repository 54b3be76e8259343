use crate::tree::NodeId;
use crate::{Literal, Span};
use serde::{Deserialize, Serialize};

/// Structured representation of an annotation applied to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: NodeId,
    pub name: AnnotationName,
    pub arguments: Vec<AnnotationArgument>,
    pub span: Span,
}

impl Annotation {
    pub fn qualified_name(&self) -> String {
        self.name.qualified_name()
    }

    /// Explicitly written value for `attribute`. A positional argument answers
    /// for `value`, matching Java's single-element shorthand.
    pub fn attribute(&self, attribute: &str) -> Option<&AnnotationValue> {
        self.arguments.iter().find_map(|argument| match argument {
            AnnotationArgument::Named { name, value, .. } if name == attribute => Some(value),
            AnnotationArgument::Positional { value, .. } if attribute == "value" => Some(value),
            _ => None,
        })
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attribute(attribute).is_some()
    }

    /// Declared boolean value; `None` when the attribute was omitted.
    pub fn bool_attribute(&self, attribute: &str) -> Option<bool> {
        match self.attribute(attribute)? {
            AnnotationValue::Literal(Literal::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn bool_attribute_or(&self, attribute: &str, default: bool) -> bool {
        self.bool_attribute(attribute).unwrap_or(default)
    }

    pub fn string_attribute(&self, attribute: &str) -> Option<&str> {
        match self.attribute(attribute)? {
            AnnotationValue::Literal(Literal::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// String list view. A single string counts as a one element list.
    pub fn string_list_attribute(&self, attribute: &str) -> Vec<String> {
        match self.attribute(attribute) {
            Some(AnnotationValue::Array(values)) => values
                .iter()
                .filter_map(|value| match value {
                    AnnotationValue::Literal(Literal::String(text)) => Some(text.clone()),
                    _ => None,
                })
                .collect(),
            Some(AnnotationValue::Literal(Literal::String(text))) => vec![text.clone()],
            _ => Vec::new(),
        }
    }

    /// Enum constant name, e.g. `NONE` for `AccessLevel.NONE`.
    pub fn enum_attribute(&self, attribute: &str) -> Option<&str> {
        match self.attribute(attribute)? {
            AnnotationValue::EnumConstant { constant, .. } => Some(constant.as_str()),
            _ => None,
        }
    }
}

/// Qualified annotation name broken into package segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationName {
    pub segments: Vec<String>,
    #[serde(default)]
    pub span: Span,
}

impl AnnotationName {
    pub fn new(segments: Vec<String>, span: Span) -> Self {
        Self { segments, span }
    }

    pub fn parse(dotted: &str) -> Self {
        let segments = dotted
            .trim()
            .trim_start_matches('@')
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(segments, Span::dummy())
    }

    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn qualified_name(&self) -> String {
        self.segments.join(".")
    }

    pub fn is_qualified(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Annotation argument storing positional or named value forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationArgument {
    Positional {
        value: AnnotationValue,
        #[serde(default)]
        span: Span,
    },
    Named {
        name: String,
        value: AnnotationValue,
        #[serde(default)]
        span: Span,
    },
}

impl AnnotationArgument {
    pub fn named(name: impl Into<String>, value: AnnotationValue) -> Self {
        AnnotationArgument::Named {
            name: name.into(),
            value,
            span: Span::dummy(),
        }
    }

    pub fn positional(value: AnnotationValue) -> Self {
        AnnotationArgument::Positional {
            value,
            span: Span::dummy(),
        }
    }
}

/// Supported annotation value variants mirroring Java semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    Literal(Literal),
    EnumConstant {
        type_path: Vec<String>,
        constant: String,
    },
    Array(Vec<AnnotationValue>),
    ClassLiteral {
        type_path: Vec<String>,
    },
}

impl AnnotationValue {
    pub fn string(value: impl Into<String>) -> Self {
        AnnotationValue::Literal(Literal::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        AnnotationValue::Literal(Literal::Boolean(value))
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnnotationValue::Array(values.into_iter().map(Self::string).collect())
    }

    /// `AccessLevel.NONE` style constant written as `Type.CONSTANT`.
    pub fn enum_constant(dotted: &str) -> Self {
        let mut type_path: Vec<String> = dotted.split('.').map(str::to_string).collect();
        let constant = type_path.pop().unwrap_or_default();
        AnnotationValue::EnumConstant {
            type_path,
            constant,
        }
    }
}
