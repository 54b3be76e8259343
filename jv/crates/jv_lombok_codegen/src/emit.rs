use crate::body::{JavaBlock, JavaExpr, JavaStmt, UnaryOp};
use crate::JavaSourceBuilder;
use jv_lombok_ast::{Annotation, AnnotationArgument, AnnotationValue, Literal};

const PRIMARY: u8 = 15;
const UNARY: u8 = 13;

/// Prints a block's statements, one per line, at the builder's current indent.
pub fn emit_block(builder: &mut JavaSourceBuilder, block: &JavaBlock) {
    for statement in &block.statements {
        emit_statement(builder, statement);
    }
}

/// Renders a block with the given indent unit and no enclosing braces.
pub fn render_block(block: &JavaBlock, indent: &str) -> String {
    let mut builder = JavaSourceBuilder::new(indent.to_string());
    emit_block(&mut builder, block);
    builder.build()
}

pub fn emit_statement(builder: &mut JavaSourceBuilder, statement: &JavaStmt) {
    match statement {
        JavaStmt::If {
            condition,
            then_branch,
        } => {
            let head = format!("if ({})", render_expression(condition));
            match then_branch.as_slice() {
                [single] if !matches!(single, JavaStmt::If { .. }) => {
                    builder.push_line(&format!("{} {}", head, render_simple_statement(single)));
                }
                branch => {
                    builder.push_line(&format!("{} {{", head));
                    builder.indent();
                    for inner in branch {
                        emit_statement(builder, inner);
                    }
                    builder.dedent();
                    builder.push_line("}");
                }
            }
        }
        other => builder.push_line(&render_simple_statement(other)),
    }
}

fn render_simple_statement(statement: &JavaStmt) -> String {
    match statement {
        JavaStmt::Return(expr) => format!("return {};", render_expression(expr)),
        JavaStmt::LocalVariable {
            is_final,
            ty,
            name,
            initializer,
        } => {
            let prefix = if *is_final { "final " } else { "" };
            match initializer {
                Some(init) => format!(
                    "{}{} {} = {};",
                    prefix,
                    ty.canonical_text(),
                    name,
                    render_expression(init)
                ),
                None => format!("{}{} {};", prefix, ty.canonical_text(), name),
            }
        }
        JavaStmt::Assign { target, value } => {
            format!("{} = {};", render_expression(target), render_expression(value))
        }
        JavaStmt::Expression(expr) => format!("{};", render_expression(expr)),
        JavaStmt::If {
            condition,
            then_branch,
        } => {
            let inner: Vec<String> = then_branch.iter().map(render_simple_statement).collect();
            format!("if ({}) {{ {} }}", render_expression(condition), inner.join(" "))
        }
    }
}

/// Java source text for one expression.
pub fn render_expression(expr: &JavaExpr) -> String {
    match expr {
        JavaExpr::This => "this".to_string(),
        JavaExpr::Super => "super".to_string(),
        JavaExpr::Literal(literal) => render_literal(literal),
        JavaExpr::Identifier(name) => name.clone(),
        JavaExpr::FieldAccess { receiver, name } => {
            format!("{}.{}", wrap(receiver, PRIMARY), name)
        }
        JavaExpr::MethodCall {
            receiver,
            name,
            args,
        } => {
            let args = render_arguments(args);
            match receiver {
                Some(receiver) => format!("{}.{}({})", wrap(receiver, PRIMARY), name, args),
                None => format!("{}({})", name, args),
            }
        }
        JavaExpr::New { ty, args } => {
            format!("new {}({})", ty.canonical_text(), render_arguments(args))
        }
        JavaExpr::Binary { op, left, right } => {
            let precedence = op.precedence();
            format!(
                "{} {} {}",
                wrap(left, precedence),
                op.symbol(),
                wrap(right, precedence + 1)
            )
        }
        JavaExpr::Unary { op, operand } => {
            let symbol = match op {
                UnaryOp::Not => "!",
                UnaryOp::Negate => "-",
            };
            format!("{}{}", symbol, wrap(operand, UNARY))
        }
        JavaExpr::Conditional {
            condition,
            then_expr,
            else_expr,
        } => format!(
            "{} ? {} : {}",
            wrap(condition, 2),
            wrap(then_expr, 2),
            wrap(else_expr, 1)
        ),
        JavaExpr::Cast { ty, expr } => {
            format!("({}) {}", ty.canonical_text(), wrap(expr, UNARY))
        }
        JavaExpr::InstanceOf { expr, ty } => {
            format!("{} instanceof {}", wrap(expr, 10), ty.canonical_text())
        }
    }
}

fn render_arguments(args: &[JavaExpr]) -> String {
    args.iter()
        .map(render_expression)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parenthesizes `expr` when it binds looser than `minimum`.
fn wrap(expr: &JavaExpr, minimum: u8) -> String {
    let rendered = render_expression(expr);
    if expr.precedence() < minimum {
        format!("({})", rendered)
    } else {
        rendered
    }
}

/// Annotation source text without the leading `@`, arguments in written order.
pub fn render_annotation(annotation: &Annotation) -> String {
    let name = annotation.qualified_name();
    if annotation.arguments.is_empty() {
        return name;
    }
    let arguments: Vec<String> = annotation
        .arguments
        .iter()
        .map(|argument| match argument {
            AnnotationArgument::Positional { value, .. } => render_annotation_value(value),
            AnnotationArgument::Named { name, value, .. } => {
                format!("{} = {}", name, render_annotation_value(value))
            }
        })
        .collect();
    format!("{}({})", name, arguments.join(", "))
}

fn render_annotation_value(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Literal(literal) => render_literal(literal),
        AnnotationValue::EnumConstant {
            type_path,
            constant,
        } if type_path.is_empty() => constant.clone(),
        AnnotationValue::EnumConstant {
            type_path,
            constant,
        } => format!("{}.{}", type_path.join("."), constant),
        AnnotationValue::Array(values) => format!(
            "{{{}}}",
            values
                .iter()
                .map(render_annotation_value)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        AnnotationValue::ClassLiteral { type_path } => format!("{}.class", type_path.join(".")),
    }
}

pub fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(value) => format!("\"{}\"", escape_string(value)),
        Literal::Number(value) => value.clone(),
        Literal::Boolean(value) => value.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Character(value) => {
            let escaped = match value {
                '\\' => "\\\\".to_string(),
                '\n' => "\\n".to_string(),
                '\r' => "\\r".to_string(),
                '\t' => "\\t".to_string(),
                '\'' => "\\'".to_string(),
                other => other.to_string(),
            };
            format!("'{}'", escaped)
        }
    }
}

fn escape_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            other => result.push(other),
        }
    }
    result
}
