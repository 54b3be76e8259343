// jv_lombok_codegen - Java lowering for synthesized member bodies
pub mod body;
pub mod emit;

pub use body::{BinaryOp, JavaBlock, JavaExpr, JavaStmt, UnaryOp};
pub use emit::{
    emit_block, emit_statement, render_annotation, render_block, render_expression, render_literal,
};

/// Indentation used when no configuration overrides it.
pub const DEFAULT_INDENT: &str = "    ";

/// Builder for generating Java source code fragments
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
    indent: String,
}

impl JavaSourceBuilder {
    pub fn new(indent: String) -> Self {
        Self {
            content: String::new(),
            indent_level: 0,
            indent,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.content.push_str(&self.indent);
        }
        self.content.push_str(line);
        self.content.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl Default for JavaSourceBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT.to_string())
    }
}

#[cfg(test)]
mod tests;
