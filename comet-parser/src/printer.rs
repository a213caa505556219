//! Renders an AST as an indented tree, one node per line.

use crate::ast::*;
use crate::visitor::*;
use std::fmt::Display;

const INDENT_WIDTH: usize = 2;

#[derive(Default)]
pub struct AstPrinter {
    indent: usize,
    buffer: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the whole tree under `root`.
    pub fn print(root: &RootNode) -> Result<String, VisitError> {
        let mut printer = Self::new();
        printer.visit_root(root)?;
        Ok(printer.into_inner())
    }

    pub fn into_inner(self) -> String {
        self.buffer
    }

    fn line(&mut self, text: impl Display) {
        for _ in 0..self.indent {
            self.buffer.push(' ');
        }
        self.buffer.push_str(&text.to_string());
        self.buffer.push('\n');
    }

    /// Runs `walk` with one more level of indentation.
    fn nested(&mut self, walk: impl FnOnce(&mut Self) -> VisitResult) -> VisitResult {
        self.indent += INDENT_WIDTH;
        let result = walk(self);
        self.indent -= INDENT_WIDTH;
        result
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_root(&mut self, root: &'ast RootNode) -> VisitResult {
        self.line("RootNode");
        self.nested(|p| walk_root(p, root))
    }

    fn visit_block_stmt(&mut self, stmt: &'ast BlockStmt) -> VisitResult {
        self.line("BlockStatement");
        self.nested(|p| walk_block_stmt(p, stmt))
    }

    fn visit_declaration_stmt(&mut self, stmt: &'ast DeclarationStmt) -> VisitResult {
        self.line(format_args!("DeclarationStatement({})", stmt.ident.name));
        self.nested(|p| walk_declaration_stmt(p, stmt))
    }

    fn visit_return_stmt(&mut self, stmt: &'ast ReturnStmt) -> VisitResult {
        self.line("ReturnStatement");
        self.nested(|p| walk_return_stmt(p, stmt))
    }

    fn visit_if_stmt(&mut self, stmt: &'ast IfStmt) -> VisitResult {
        self.line("IfStatement");
        self.nested(|p| walk_if_stmt(p, stmt))
    }

    fn visit_function_stmt(&mut self, stmt: &'ast FunctionStmt) -> VisitResult {
        self.line(format_args!(
            "FunctionStatement({}/{})",
            stmt.ident.name,
            stmt.params.len()
        ));
        self.nested(|p| walk_function_stmt(p, stmt))
    }

    fn visit_expr_stmt(&mut self, stmt: &'ast ExprStmt) -> VisitResult {
        self.line("ExpressionStatement");
        self.nested(|p| walk_expr_stmt(p, stmt))
    }

    fn visit_number_lit(&mut self, expr: &'ast NumberLit) -> VisitResult {
        self.line(format_args!("Number({})", expr.value));
        Ok(())
    }

    fn visit_bool_lit(&mut self, expr: &'ast BoolLit) -> VisitResult {
        self.line(format_args!("Boolean({})", expr.value));
        Ok(())
    }

    fn visit_string_lit(&mut self, expr: &'ast StringLit) -> VisitResult {
        self.line(format_args!("String({:?})", expr.value));
        Ok(())
    }

    fn visit_identifier(&mut self, expr: &'ast Identifier) -> VisitResult {
        self.line(format_args!("Identifier({})", expr.name));
        Ok(())
    }

    fn visit_prefix_expr(&mut self, expr: &'ast PrefixExpr) -> VisitResult {
        self.line(format_args!("Prefix({})", expr.op));
        self.nested(|p| walk_prefix_expr(p, expr))
    }

    fn visit_binary_expr(&mut self, expr: &'ast BinaryExpr) -> VisitResult {
        self.line(format_args!("Binary({})", expr.op));
        self.nested(|p| walk_binary_expr(p, expr))
    }

    fn visit_parenthesised_expr(&mut self, expr: &'ast ParenthesisedExpr) -> VisitResult {
        self.line("Parenthesised");
        self.nested(|p| walk_parenthesised_expr(p, expr))
    }

    fn visit_call_expr(&mut self, expr: &'ast CallExpr) -> VisitResult {
        self.line(format_args!("Call({}/{})", expr.callee.name, expr.args.len()));
        self.nested(|p| walk_call_expr(p, expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use insta::assert_snapshot;

    fn print(source: &str) -> String {
        AstPrinter::print(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_print_calls() {
        assert_snapshot!(print("var a = hello(10, 2)\nvar c = goodBay(\"call\", something(), a)"), @r###"
        RootNode
          DeclarationStatement(a)
            Call(hello/2)
              Number(10)
              Number(2)
          DeclarationStatement(c)
            Call(goodBay/3)
              String("call")
              Call(something/0)
              Identifier(a)
        "###);
    }

    #[test]
    fn test_print_precedence() {
        assert_snapshot!(print("1 + 2 * -(3 - 4) == !false"), @r###"
        RootNode
          ExpressionStatement
            Binary(==)
              Binary(+)
                Number(1)
                Binary(*)
                  Number(2)
                  Prefix(-)
                    Parenthesised
                      Binary(-)
                        Number(3)
                        Number(4)
              Prefix(!)
                Boolean(false)
        "###);
    }

    #[test]
    fn test_print_statements() {
        assert_snapshot!(print("func max(a, b) { if a > b { return a } else { return b } }"), @r###"
        RootNode
          FunctionStatement(max/2)
            Identifier(a)
            Identifier(b)
            BlockStatement
              IfStatement
                Binary(>)
                  Identifier(a)
                  Identifier(b)
                BlockStatement
                  ReturnStatement
                    Identifier(a)
                BlockStatement
                  ReturnStatement
                    Identifier(b)
        "###);
    }
}
