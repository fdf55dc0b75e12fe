use std::collections::HashMap;
use std::mem;

use log::trace;

use crate::error::{ResolveError, Warning};
use crate::expr::{Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Tracks a local binding's lifecycle so the resolver can both catch
/// self-referencing initializers and flag locals that are declared but never read.
#[derive(Clone, Copy, PartialEq, Eq)]
enum VarState {
    Declared,
    Defined,
    Used,
}

struct Local {
    state: VarState,
    token: Token,
}

/// The static analysis pass between parsing and interpretation: assigns every variable
/// reference a lexical hop-count (via [`Interpreter::resolve`]) and catches scoping
/// mistakes the parser has no way to see (`return` outside a function, `this` outside a
/// class, reading a variable from its own initializer, `break` outside a loop).
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    scopes: Vec<HashMap<String, Local>>,
    current_function: FunctionType,
    current_class: ClassType,
    loop_depth: usize,
    errors: Vec<ResolveError>,
    warnings: Vec<Warning>,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loop_depth: 0,
            errors: vec![],
            warnings: vec![],
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> (Vec<ResolveError>, Vec<Warning>) {
        for statement in statements {
            self.resolve_stmt(statement);
        }

        (self.errors, self.warnings)
    }

    fn resolve_function_body(&mut self, params: &[Token], body: &[Stmt], kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);
        let enclosing_loop_depth = mem::replace(&mut self.loop_depth, 0);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        for statement in body {
            self.resolve_stmt(statement);
        }
        self.end_scope();

        self.current_function = enclosing_function;
        self.loop_depth = enclosing_loop_depth;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
        trace!("begin scope, depth {}", self.scopes.len());
    }

    fn end_scope(&mut self) {
        trace!("end scope, depth {}", self.scopes.len());

        if let Some(scope) = self.scopes.pop() {
            for local in scope.into_values() {
                if local.state != VarState::Used {
                    self.warnings.push(Warning {
                        token: local.token.clone(),
                        message: format!("Local variable '{}' not used.", local.token.lexeme),
                    });
                }
            }
        }
    }

    /// Binds a synthetic, never-reported name (`this`, `super`) directly as already
    /// used, so it never triggers an unused-local warning.
    fn declare_synthetic(&mut self, name: &str, token: &Token) {
        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(name.to_string(), Local { state: VarState::Used, token: token.clone() });
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.errors.push(ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            });
        }

        scope.insert(name.lexeme.to_owned(), Local { state: VarState::Declared, token: name.clone() });
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if let Some(local) = scope.get_mut(&name.lexeme) {
            local.state = VarState::Defined;
        }
    }

    fn resolve_local(&mut self, name: &Token) {
        let len = self.scopes.len();
        for depth in 0..len {
            let idx = len - 1 - depth;
            if let Some(local) = self.scopes[idx].get_mut(&name.lexeme) {
                local.state = VarState::Used;
                self.interpreter.resolve(name, depth);
                return;
            }
        }
        // Not found in any scope: treated as a global, resolved dynamically at runtime.
    }

    /// Same hop-count resolution as [`Self::resolve_local`], but for an assignment
    /// target: a write alone doesn't count as reading the local, so it leaves the state
    /// at `Defined` rather than bumping it to `Used`. A write-only local still warns.
    fn resolve_local_assignment(&mut self, name: &Token) {
        let len = self.scopes.len();
        for depth in 0..len {
            let idx = len - 1 - depth;
            if let Some(local) = self.scopes[idx].get_mut(&name.lexeme) {
                if local.state != VarState::Used {
                    local.state = VarState::Defined;
                }
                self.interpreter.resolve(name, depth);
                return;
            }
        }
        // Not found in any scope: treated as a global, resolved dynamically at runtime.
    }
}

impl<'a> ExprVisitor<()> for Resolver<'a> {
    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(variable) = expr else { unreachable!() };

        if let Some(scope) = self.scopes.last() {
            if let Some(local) = scope.get(&variable.name.lexeme) {
                if local.state == VarState::Declared {
                    self.errors.push(ResolveError {
                        token: variable.name.to_owned(),
                        message: "Can't read local variable in its own initializer.".to_string(),
                    });
                }
            }
        }

        self.resolve_local(&variable.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(assign) = expr else { unreachable!() };

        self.resolve_expr(&assign.value);
        self.resolve_local_assignment(&assign.name);
    }

    fn visit_literal_expr(&mut self, _expr: &Expr) {}

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(logical) = expr else { unreachable!() };

        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(unary) = expr else { unreachable!() };

        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(binary) = expr else { unreachable!() };

        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.resolve_expr(&grouping.expr);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(call) = expr else { unreachable!() };

        self.resolve_expr(&call.callee);
        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) {
        let Expr::Get(get) = expr else { unreachable!() };

        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, expr: &Expr) {
        let Expr::Set(set) = expr else { unreachable!() };

        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, expr: &Expr) {
        let Expr::This(this) = expr else { unreachable!() };

        if self.current_class == ClassType::None {
            self.errors.push(ResolveError {
                token: this.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
            return;
        }

        self.resolve_local(&this.keyword);
    }

    fn visit_super_expr(&mut self, expr: &Expr) {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        match self.current_class {
            ClassType::Subclass => (),
            ClassType::None => self.errors.push(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }),
            ClassType::Class => self.errors.push(ResolveError {
                token: super_expr.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }),
        }

        self.resolve_local(&super_expr.keyword);
    }

    fn visit_ternary_expr(&mut self, expr: &Expr) {
        let Expr::Ternary(ternary) = expr else { unreachable!() };

        self.resolve_expr(&ternary.condition);
        self.resolve_expr(&ternary.then_branch);
        self.resolve_expr(&ternary.else_branch);
    }

    fn visit_function_expr(&mut self, expr: &Expr) {
        let Expr::Function(function) = expr else { unreachable!() };

        self.resolve_function_body(&function.params, &function.body, FunctionType::Function);
    }
}

impl<'a> StmtVisitor<()> for Resolver<'a> {
    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(block) = stmt else { unreachable!() };

        self.begin_scope();
        for statement in &block.statements {
            self.resolve_stmt(statement);
        }
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(var) = stmt else { unreachable!() };

        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(function) = stmt else { unreachable!() };

        self.declare(&function.name);
        self.define(&function.name);

        self.resolve_function_body(&function.params, &function.body, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(expr) = stmt else { unreachable!() };

        self.resolve_expr(&expr.expr);
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(if_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(print) = stmt else { unreachable!() };

        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(return_stmt) = stmt else { unreachable!() };

        if self.current_function == FunctionType::None {
            self.errors.push(ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &return_stmt.value {
            if self.current_function == FunctionType::Initializer {
                self.errors.push(ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_break_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Break(break_stmt) = stmt else { unreachable!() };

        if self.loop_depth == 0 {
            self.errors.push(ResolveError {
                token: break_stmt.keyword.clone(),
                message: "Can't break outside of loop body.".to_string(),
            });
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(while_stmt) = stmt else { unreachable!() };

        self.resolve_expr(&while_stmt.condition);

        self.loop_depth += 1;
        self.resolve_stmt(&while_stmt.body);
        self.loop_depth -= 1;
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Class(class_stmt) = stmt else { unreachable!() };

        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class_stmt.name);
        self.define(&class_stmt.name);

        if let Some(superclass) = &class_stmt.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if class_stmt.name.lexeme == variable.name.lexeme {
                self.errors.push(ResolveError {
                    token: variable.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                });
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.declare_synthetic("super", &class_stmt.name);
        }

        self.begin_scope();
        self.declare_synthetic("this", &class_stmt.name);

        for method in &class_stmt.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let kind = if function.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function_body(&function.params, &function.body, kind);
        }

        // Class methods resolve in the same `this`/`super` scope as instance methods;
        // `this` will statically resolve inside one but is never bound at call time,
        // so using it there is a runtime "Undefined variable" rather than a resolve error.
        for method in &class_stmt.class_methods {
            let Stmt::Function(function) = method else { unreachable!() };

            self.resolve_function_body(&function.params, &function.body, FunctionType::Method);
        }

        self.end_scope();

        if class_stmt.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}
