use crate::error::RuntimeError;
use comet_parser::ast::*;
use comet_source::Span;
use comet_value::{Env, Environment, Function, Object};
use std::mem;
use std::rc::Rc;
use tracing::{debug, instrument};

/// Outcome of evaluating a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Evaluation completed normally with a value.
    Value(Object),
    /// A `return` is unwinding to the enclosing function (or program).
    Return(Object),
}

impl Flow {
    pub fn into_value(self) -> Object {
        match self {
            Flow::Value(val) | Flow::Return(val) => val,
        }
    }
}

pub type EvalResult<T> = Result<T, RuntimeError>;

pub struct Evaluator {
    /// The active scope. Swapped out for the call scope while a function body runs.
    env: Env,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an `Evaluator` with an empty global scope.
    pub fn new() -> Self {
        Self::with_environment(Environment::new())
    }

    /// Create an `Evaluator` that runs in `env`. Bindings made at top level are kept there.
    pub fn with_environment(env: Env) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    /// Evaluates every statement of `root` and returns the value of the last one.
    /// A top level `return` ends the program with its value.
    #[instrument(level = "debug", skip_all)]
    pub fn eval_program(&mut self, root: &RootNode) -> EvalResult<Object> {
        Ok(self.eval_stmt_list(&root.statements)?.into_value())
    }

    /* Statements */
    pub fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::Block(block) => self.eval_stmt_list(&block.statements),
            Stmt::Declaration(decl) => {
                let value = self.eval_expr(&decl.initializer)?;
                self.env.borrow_mut().set(decl.ident.name.clone(), value);
                Ok(Flow::Value(Object::Null))
            }
            Stmt::Return(ret) => Ok(Flow::Return(self.eval_expr(&ret.expr)?)),
            Stmt::If(if_stmt) => self.eval_if_stmt(if_stmt),
            Stmt::Function(func) => {
                let value = Object::Function(Rc::new(Function {
                    ident: func.ident.name.clone(),
                    params: func.params.iter().map(|param| param.name.clone()).collect(),
                    body: Rc::clone(&func.body),
                    env: Rc::clone(&self.env),
                }));
                self.env.borrow_mut().set(func.ident.name.clone(), value);
                Ok(Flow::Value(Object::Null))
            }
            Stmt::Expr(expr_stmt) => Ok(Flow::Value(self.eval_expr(&expr_stmt.expr)?)),
        }
    }

    /// Evaluates `body` in order. Stops early when a statement returns.
    fn eval_stmt_list(&mut self, body: &[Stmt]) -> EvalResult<Flow> {
        let mut last = Object::Null;
        for stmt in body {
            match self.eval_stmt(stmt)? {
                Flow::Value(val) => last = val,
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }
        Ok(Flow::Value(last))
    }

    fn eval_if_stmt(&mut self, if_stmt: &IfStmt) -> EvalResult<Flow> {
        let test = self.eval_expr(&if_stmt.test)?;
        let test = match test.cast_to_bool() {
            Some(test) => test,
            None => {
                return Err(RuntimeError::NonBooleanCondition {
                    found: test.kind(),
                    span: if_stmt.test.span(),
                })
            }
        };

        if test {
            self.eval_stmt(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.eval_stmt(else_branch)
        } else {
            Ok(Flow::Value(Object::Null))
        }
    }

    /* Expressions */
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Object> {
        match expr {
            Expr::NumberLit(lit) => Ok(Object::Integer(lit.value)),
            Expr::BoolLit(lit) => Ok(Object::boolean(lit.value)),
            Expr::StringLit(lit) => Ok(Object::string(&lit.value)),
            Expr::Identifier(ident) => self.lookup(ident),
            Expr::Prefix(prefix) => self.eval_prefix_expr(prefix),
            Expr::Binary(binary) => self.eval_binary_expr(binary),
            Expr::Parenthesised(paren) => self.eval_expr(&paren.inner),
            Expr::Call(call) => self.eval_call_expr(call),
        }
    }

    fn lookup(&self, ident: &Identifier) -> EvalResult<Object> {
        self.env
            .borrow()
            .get(&ident.name)
            .ok_or_else(|| RuntimeError::UnboundIdentifier {
                name: ident.name.clone(),
                span: ident.span.clone(),
            })
    }

    fn eval_prefix_expr(&mut self, prefix: &PrefixExpr) -> EvalResult<Object> {
        let arg = self.eval_expr(&prefix.arg)?;
        match (prefix.op, &arg) {
            (PrefixOp::Not, Object::Boolean(val)) => Ok(Object::boolean(!val.value())),
            (PrefixOp::Neg, Object::Integer(val)) => Ok(Object::Integer(val.wrapping_neg())),
            (op, _) => Err(RuntimeError::PrefixType {
                op,
                operand: arg.kind(),
                span: prefix.span.clone(),
            }),
        }
    }

    fn eval_binary_expr(&mut self, binary: &BinaryExpr) -> EvalResult<Object> {
        let lhs = self.eval_expr(&binary.lhs)?;
        let rhs = self.eval_expr(&binary.rhs)?;

        match (binary.op, &lhs, &rhs) {
            // equality is defined between any two kinds
            (BinaryOp::Eq, _, _) => Ok(Object::boolean(lhs.equals(&rhs))),
            (BinaryOp::NotEq, _, _) => Ok(Object::boolean(!lhs.equals(&rhs))),
            (op, Object::Integer(l), Object::Integer(r)) => {
                integer_binary_op(op, *l, *r, &binary.span)
            }
            (op, _, _) => Err(RuntimeError::BinaryType {
                op,
                lhs: lhs.kind(),
                rhs: rhs.kind(),
                span: binary.span.clone(),
            }),
        }
    }

    fn eval_call_expr(&mut self, call: &CallExpr) -> EvalResult<Object> {
        let func = match self.lookup(&call.callee)? {
            Object::Function(func) => func,
            other => {
                return Err(RuntimeError::NotCallable {
                    name: call.callee.name.clone(),
                    kind: other.kind(),
                    span: call.callee.span.clone(),
                })
            }
        };
        if func.arity() != call.args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: func.ident.clone(),
                expected: func.arity(),
                found: call.args.len(),
                span: call.span.clone(),
            });
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg)?);
        }
        debug!(func = %func.ident, args = args.len(), "call");

        let scope = Environment::new_enclosed(&func.env);
        {
            let mut scope = scope.borrow_mut();
            for (param, arg) in func.params.iter().zip(args) {
                scope.set(param.clone(), arg);
            }
        }

        let caller_env = mem::replace(&mut self.env, scope);
        let result = self.eval_stmt_list(&func.body.statements);
        self.env = caller_env;

        Ok(result?.into_value())
    }
}

/// Applies `op` to two integers. Arithmetic wraps on overflow, division truncates toward zero.
fn integer_binary_op(op: BinaryOp, l: i64, r: i64, span: &Span) -> EvalResult<Object> {
    Ok(match op {
        BinaryOp::Add => Object::Integer(l.wrapping_add(r)),
        BinaryOp::Sub => Object::Integer(l.wrapping_sub(r)),
        BinaryOp::Mul => Object::Integer(l.wrapping_mul(r)),
        BinaryOp::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero { span: span.clone() });
            }
            Object::Integer(l.wrapping_div(r))
        }
        BinaryOp::Eq => Object::boolean(l == r),
        BinaryOp::NotEq => Object::boolean(l != r),
        BinaryOp::Less => Object::boolean(l < r),
        BinaryOp::LessEq => Object::boolean(l <= r),
        BinaryOp::Greater => Object::boolean(l > r),
        BinaryOp::GreaterEq => Object::boolean(l >= r),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use comet_parser::parse;
    use comet_value::{FALSE, TRUE};
    use pretty_assertions::assert_eq;
    use std::ptr;

    fn eval(source: &str) -> EvalResult<Object> {
        let root = parse(source).unwrap();
        Evaluator::new().eval_program(&root)
    }

    fn assert_integer(source: &str, expected: i64) {
        match eval(source) {
            Ok(Object::Integer(val)) => assert_eq!(val, expected, "{}", source),
            other => panic!("{}: expected integer, got {:?}", source, other),
        }
    }

    fn assert_boolean(source: &str, expected: bool) {
        match eval(source) {
            Ok(Object::Boolean(val)) => {
                let singleton = if expected { &TRUE } else { &FALSE };
                assert!(ptr::eq(val, singleton), "{}", source);
            }
            other => panic!("{}: expected boolean, got {:?}", source, other),
        }
    }

    #[test]
    fn test_integers() {
        let tests = [
            ("-1", -1),
            ("10", 10),
            ("9223372036854775807", i64::MAX),
            ("1 + 1", 2),
            ("1 - 1", 0),
            ("2 * 15", 30),
            ("15 / 3", 5),
            ("1 + 2 * 3", 7),
            ("1 * -2", -2),
            ("(1)", 1),
            ("(1 + 2) * 3", 9),
            ("-7 / 2", -3),
            ("7 / -2", -3),
            ("--5", 5),
        ];
        for (source, expected) in tests {
            assert_integer(source, expected);
        }
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_integer("9223372036854775807 + 1", i64::MIN);
        assert_integer("-9223372036854775807 - 2", i64::MAX);
        assert_integer("(-9223372036854775807 - 1) / -1", i64::MIN);
        assert_integer("-(-9223372036854775807 - 1)", i64::MIN);
    }

    #[test]
    fn test_booleans() {
        let tests = [
            ("true", true),
            ("false", false),
            ("!true", false),
            ("!!true", true),
            ("true == true", true),
            ("true != false", true),
            ("true == false", false),
            ("1 == true", false),
            ("1 != true", true),
            ("0 == false", false),
            ("false != 0", true),
            ("1 == 1", true),
            ("1 != 2", true),
            ("1 < 2", true),
            ("2 <= 2", true),
            ("1 > 2", false),
            ("3 >= 4", false),
            ("\"a\" == \"a\"", true),
            ("\"a\" == \"b\"", false),
            ("\"1\" == 1", false),
        ];
        for (source, expected) in tests {
            assert_boolean(source, expected);
        }
    }

    #[test]
    fn test_grouping_is_transparent() {
        for source in ["1 + 2 * 3", "!true", "1 == true", "-(4 / 2)", "2 * 15 - 3"] {
            assert_eq!(eval(source), eval(&format!("({})", source)), "{}", source);
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(eval("\"comet\"").unwrap(), Object::string("comet"));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1 / 0"), Err(RuntimeError::DivisionByZero { span: 0..5 }));
        assert!(matches!(
            eval("var x = 0\n10 / (x * 3)"),
            Err(RuntimeError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(
            eval("-true"),
            Err(RuntimeError::PrefixType {
                op: PrefixOp::Neg,
                operand: comet_value::ObjectKind::Boolean,
                span: 0..5,
            })
        );
        assert_eq!(
            eval("!1"),
            Err(RuntimeError::PrefixType {
                op: PrefixOp::Not,
                operand: comet_value::ObjectKind::Integer,
                span: 0..2,
            })
        );
        assert_eq!(
            eval("1 + true"),
            Err(RuntimeError::BinaryType {
                op: BinaryOp::Add,
                lhs: comet_value::ObjectKind::Integer,
                rhs: comet_value::ObjectKind::Boolean,
                span: 0..8,
            })
        );
        assert!(matches!(
            eval("\"a\" < \"b\""),
            Err(RuntimeError::BinaryType { op: BinaryOp::Less, .. })
        ));
    }

    #[test]
    fn test_errors_stop_evaluation() {
        let root = parse("var a = 1\nvar b = a / 0\nvar c = 3").unwrap();
        let mut evaluator = Evaluator::new();
        assert!(evaluator.eval_program(&root).is_err());
        let env = evaluator.environment().borrow();
        assert_eq!(env.get("a"), Some(Object::Integer(1)));
        assert_eq!(env.get("b"), None);
        assert_eq!(env.get("c"), None);
    }

    #[test]
    fn test_declarations() {
        assert_integer("var a = 5\na", 5);
        assert_integer("var a = 5\nvar b = a * 2\nb + a", 15);
        assert_integer("var a = 1; var a = a + 1; a", 2);
        assert_eq!(eval("var a = 1").unwrap(), Object::Null);
        assert_eq!(
            eval("a + 1"),
            Err(RuntimeError::UnboundIdentifier {
                name: "a".to_string(),
                span: 0..1,
            })
        );
    }

    #[test]
    fn test_blocks() {
        assert_integer("{ var a = 1\n a + 1 }", 2);
        // blocks share the enclosing scope
        assert_integer("{ var a = 3 }\na", 3);
        assert_eq!(eval("{}").unwrap(), Object::Null);
        assert_eq!(eval("").unwrap(), Object::Null);
    }

    #[test]
    fn test_if() {
        assert_integer("if true { 1 } else { 2 }", 1);
        assert_integer("if 1 > 2 { 1 } else { 2 }", 2);
        assert_integer("if (1 == 1) 10", 10);
        assert_integer("if false { 1 } else if true { 2 } else { 3 }", 2);
        assert_eq!(eval("if false { 1 }").unwrap(), Object::Null);
        assert_eq!(
            eval("if 1 { 2 }"),
            Err(RuntimeError::NonBooleanCondition {
                found: comet_value::ObjectKind::Integer,
                span: 3..4,
            })
        );
    }

    #[test]
    fn test_return() {
        assert_integer("return 10\n9", 10);
        assert_integer("{ { return 1 } 2 }\n3", 1);
        assert_integer("if true { return 4 }\n5", 4);
    }

    #[test]
    fn test_functions() {
        assert_integer("func add(a, b) { a + b }\nadd(1, 2)", 3);
        assert_integer("func add(a, b) { return a + b\n 0 }\nadd(1, 2)", 3);
        assert_integer("func seven() { 7 }\nseven() * 2", 14);
        assert_integer(
            "func max(a, b) { if a > b { return a } else { return b } }\nmax(3, 9) - max(4, 1)",
            5,
        );
        assert_eq!(eval("func nothing() {}\nnothing()").unwrap(), Object::Null);
    }

    #[test]
    fn test_recursion() {
        assert_integer(
            "func fib(n) { if n < 2 { return n } return fib(n - 1) + fib(n - 2) }\nfib(15)",
            610,
        );
    }

    #[test]
    fn test_call_scope() {
        // parameters do not leak into the caller
        assert!(matches!(
            eval("func id(x) { x }\nid(1)\nx"),
            Err(RuntimeError::UnboundIdentifier { .. })
        ));
        // declarations inside a call stay inside the call
        assert!(matches!(
            eval("func f() { var inner = 1\n inner }\nf()\ninner"),
            Err(RuntimeError::UnboundIdentifier { .. })
        ));
        // parameters shadow globals
        assert_integer("var x = 1\nfunc f(x) { x * 10 }\nf(2) + x", 21);
    }

    #[test]
    fn test_closures() {
        assert_integer(
            "var base = 100\nfunc add_base(n) { base + n }\nvar base = 1\nadd_base(2)",
            3,
        );
        assert_integer(
            "func outer(a) { func inner(b) { a + b }\n return inner(10) }\nouter(5)",
            15,
        );
    }

    #[test]
    fn test_call_errors() {
        assert_eq!(
            eval("func f(a) { a }\nf(1, 2)"),
            Err(RuntimeError::ArityMismatch {
                name: "f".to_string(),
                expected: 1,
                found: 2,
                span: 16..23,
            })
        );
        assert_eq!(
            eval("var f = 1\nf()"),
            Err(RuntimeError::NotCallable {
                name: "f".to_string(),
                kind: comet_value::ObjectKind::Integer,
                span: 10..11,
            })
        );
        assert!(matches!(
            eval("missing(1)"),
            Err(RuntimeError::UnboundIdentifier { .. })
        ));
        // caller scope is restored after a failing call
        let root = parse("var a = 1\nfunc f() { 1 / 0 }\nf()").unwrap();
        let mut evaluator = Evaluator::new();
        assert!(evaluator.eval_program(&root).is_err());
        let root = parse("a").unwrap();
        assert_eq!(evaluator.eval_program(&root), Ok(Object::Integer(1)));
    }

    #[test]
    fn test_function_values() {
        assert_boolean("func f() { 1 }\nf == f", true);
        assert_boolean("func f() { 1 }\nvar g = f\ng == f", true);
        assert_boolean("func f() { 1 }\nf == 1", false);
        assert_integer("func f() { 1 }\nvar g = f\ng()", 1);
    }

    #[test]
    fn test_shared_environment() {
        let env = Environment::new();
        let mut evaluator = Evaluator::with_environment(Rc::clone(&env));
        evaluator
            .eval_program(&parse("var answer = 42").unwrap())
            .unwrap();
        assert_eq!(env.borrow().get("answer"), Some(Object::Integer(42)));
    }

    #[test]
    fn test_function_body_is_shared_with_ast() {
        let root = parse("func f() { 1 }\nfunc f() { 2 }").unwrap();
        let env = Environment::new();
        let mut evaluator = Evaluator::with_environment(Rc::clone(&env));
        evaluator.eval_program(&root).unwrap();

        let func = match env.borrow().get("f") {
            Some(Object::Function(func)) => func,
            other => panic!("expected function, got {:?}", other),
        };
        match &root.statements[1] {
            Stmt::Function(stmt) => assert!(Rc::ptr_eq(&func.body, &stmt.body)),
            other => panic!("expected function statement, got {:?}", other),
        }
        // the AST and the function object are the only owners
        assert_eq!(Rc::strong_count(&func.body), 2);
    }
}
