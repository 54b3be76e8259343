use jv_lombok_ast::{JavaType, Literal};
use serde::{Deserialize, Serialize};

/// Method body made of structured statements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JavaBlock {
    pub statements: Vec<JavaStmt>,
}

impl JavaBlock {
    pub fn new(statements: Vec<JavaStmt>) -> Self {
        Self { statements }
    }

    pub fn returning(expr: JavaExpr) -> Self {
        Self::new(vec![JavaStmt::Return(expr)])
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaStmt {
    Return(JavaExpr),
    /// `if (condition) ...` without an else branch. Single statement branches
    /// are printed on the same line.
    If {
        condition: JavaExpr,
        then_branch: Vec<JavaStmt>,
    },
    LocalVariable {
        is_final: bool,
        ty: JavaType,
        name: String,
        initializer: Option<JavaExpr>,
    },
    Assign {
        target: JavaExpr,
        value: JavaExpr,
    },
    Expression(JavaExpr),
}

impl JavaStmt {
    pub fn if_then(condition: JavaExpr, statement: JavaStmt) -> Self {
        JavaStmt::If {
            condition,
            then_branch: vec![statement],
        }
    }

    pub fn final_local(ty: JavaType, name: impl Into<String>, initializer: JavaExpr) -> Self {
        JavaStmt::LocalVariable {
            is_final: true,
            ty,
            name: name.into(),
            initializer: Some(initializer),
        }
    }

    pub fn local(ty: JavaType, name: impl Into<String>, initializer: JavaExpr) -> Self {
        JavaStmt::LocalVariable {
            is_final: false,
            ty,
            name: name.into(),
            initializer: Some(initializer),
        }
    }

    pub fn assign(target: JavaExpr, value: JavaExpr) -> Self {
        JavaStmt::Assign { target, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Equal,
    NotEqual,
    And,
    Or,
    BitXor,
    UnsignedShiftRight,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitXor => "^",
            BinaryOp::UnsignedShiftRight => ">>>",
        }
    }

    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 3,
            BinaryOp::And => 4,
            BinaryOp::BitXor => 6,
            BinaryOp::Equal | BinaryOp::NotEqual => 8,
            BinaryOp::UnsignedShiftRight => 10,
            BinaryOp::Add | BinaryOp::Subtract => 11,
            BinaryOp::Multiply => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JavaExpr {
    This,
    Super,
    Literal(Literal),
    Identifier(String),
    FieldAccess {
        receiver: Box<JavaExpr>,
        name: String,
    },
    MethodCall {
        receiver: Option<Box<JavaExpr>>,
        name: String,
        args: Vec<JavaExpr>,
    },
    New {
        ty: JavaType,
        args: Vec<JavaExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<JavaExpr>,
        right: Box<JavaExpr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<JavaExpr>,
    },
    Conditional {
        condition: Box<JavaExpr>,
        then_expr: Box<JavaExpr>,
        else_expr: Box<JavaExpr>,
    },
    Cast {
        ty: JavaType,
        expr: Box<JavaExpr>,
    },
    InstanceOf {
        expr: Box<JavaExpr>,
        ty: JavaType,
    },
}

impl JavaExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        JavaExpr::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        JavaExpr::Literal(Literal::String(value.into()))
    }

    pub fn int(value: i64) -> Self {
        JavaExpr::Literal(Literal::Number(value.to_string()))
    }

    pub fn boolean(value: bool) -> Self {
        JavaExpr::Literal(Literal::Boolean(value))
    }

    pub fn null() -> Self {
        JavaExpr::Literal(Literal::Null)
    }

    /// `this.<name>`
    pub fn this_field(name: impl Into<String>) -> Self {
        JavaExpr::field(JavaExpr::This, name)
    }

    pub fn field(receiver: JavaExpr, name: impl Into<String>) -> Self {
        JavaExpr::FieldAccess {
            receiver: Box::new(receiver),
            name: name.into(),
        }
    }

    pub fn call(receiver: JavaExpr, name: impl Into<String>, args: Vec<JavaExpr>) -> Self {
        JavaExpr::MethodCall {
            receiver: Some(Box::new(receiver)),
            name: name.into(),
            args,
        }
    }

    /// Static call on a type name, e.g. `Float.compare(a, b)`.
    pub fn static_call(owner: &str, name: impl Into<String>, args: Vec<JavaExpr>) -> Self {
        JavaExpr::call(JavaExpr::ident(owner), name, args)
    }

    pub fn new_instance(ty: JavaType, args: Vec<JavaExpr>) -> Self {
        JavaExpr::New { ty, args }
    }

    pub fn binary(op: BinaryOp, left: JavaExpr, right: JavaExpr) -> Self {
        JavaExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn eq(left: JavaExpr, right: JavaExpr) -> Self {
        JavaExpr::binary(BinaryOp::Equal, left, right)
    }

    pub fn ne(left: JavaExpr, right: JavaExpr) -> Self {
        JavaExpr::binary(BinaryOp::NotEqual, left, right)
    }

    pub fn not(operand: JavaExpr) -> Self {
        JavaExpr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn conditional(condition: JavaExpr, then_expr: JavaExpr, else_expr: JavaExpr) -> Self {
        JavaExpr::Conditional {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    pub fn cast(ty: JavaType, expr: JavaExpr) -> Self {
        JavaExpr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn instance_of(expr: JavaExpr, ty: JavaType) -> Self {
        JavaExpr::InstanceOf {
            expr: Box::new(expr),
            ty,
        }
    }

    /// Left-associated `+` chain; `None` for an empty iterator.
    pub fn concat<I>(parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = JavaExpr>,
    {
        parts
            .into_iter()
            .reduce(|left, right| JavaExpr::binary(BinaryOp::Add, left, right))
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            JavaExpr::Conditional { .. } => 1,
            JavaExpr::Binary { op, .. } => op.precedence(),
            JavaExpr::InstanceOf { .. } => 9,
            JavaExpr::Unary { .. } | JavaExpr::Cast { .. } => 13,
            _ => 15,
        }
    }
}
