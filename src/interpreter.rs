use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use log::trace;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Walks the resolved AST and evaluates it. Holds the global environment for the
/// lifetime of the run (so a REPL session keeps its bindings across lines) plus the
/// resolver's variable-to-depth map, and owns the sink `print` writes to so the driver
/// can redirect it in tests.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: Box<dyn Write>,
    call_depth: usize,
}

impl Interpreter {
    pub(crate) fn enter_call(&mut self) {
        self.call_depth += 1;
        trace!("entering call, depth {}", self.call_depth);
    }

    pub(crate) fn leave_call(&mut self) {
        trace!("leaving call, depth {}", self.call_depth);
        self.call_depth -= 1;
    }

    pub fn new(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
            call_depth: 0,
        }
    }

    /// Records how many environments up the chain `name` resolved to. Called by the
    /// resolver, consulted by [`Self::lookup_variable`] and the assignment/`super` paths.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("resolver rejects return outside of a function"),
                Err(Unwind::Break) => unreachable!("resolver rejects break outside of a loop"),
            }
        }

        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    /// Runs `statements` with `environment` installed as the current scope, restoring
    /// the caller's environment afterwards even if execution unwinds early.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn number_operands_error(operator: &Token) -> RuntimeError {
    RuntimeError { token: operator.clone(), message: "Operands must be numbers.".to_string() }
}

fn number_operand_error(operator: &Token) -> RuntimeError {
    RuntimeError { token: operator.clone(), message: "Operand must be a number.".to_string() }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<(), RuntimeError> {
    if expected != got {
        Err(RuntimeError {
            token: paren.clone(),
            message: format!("Expected {expected} arguments but got {got}."),
        })
    } else {
        Ok(())
    }
}

fn call_checked(
    callable: &impl Callable,
    interpreter: &mut Interpreter,
    arguments: Vec<Object>,
    paren: &Token,
) -> Result<Object, RuntimeError> {
    check_arity(callable.arity(), arguments.len(), paren)?;

    interpreter.enter_call();
    let result = callable.call(interpreter, arguments);
    interpreter.leave_call();

    result
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(literal) = expr else { unreachable!() };
        Ok(Object::from(literal.clone()))
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(variable) = expr else { unreachable!() };
        self.lookup_variable(&variable.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(assign) = expr else { unreachable!() };

        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.name) {
            Some(distance) => self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone()),
            None => self.globals.borrow_mut().assign(&assign.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(logical) = expr else { unreachable!() };

        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.truthy() => Ok(left),
            Type::And if !left.truthy() => Ok(left),
            Type::Or | Type::And => self.evaluate(&logical.right),
            _ => unreachable!(),
        }
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(unary) = expr else { unreachable!() };

        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| number_operand_error(&unary.operator)),
            Type::Bang => Ok(!right),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(binary) = expr else { unreachable!() };

        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.r#type {
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let ordering = left
                    .partial_cmp(&right)
                    .ok_or_else(|| number_operands_error(operator))?;
                let result = match operator.r#type {
                    Type::Greater => ordering.is_gt(),
                    Type::GreaterEqual => ordering.is_ge(),
                    Type::Less => ordering.is_lt(),
                    Type::LessEqual => ordering.is_le(),
                    _ => unreachable!(),
                };
                Ok(Object::from(result))
            }
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::Minus => (left - right).ok_or_else(|| number_operands_error(operator)),
            Type::Slash => (left / right).ok_or_else(|| number_operands_error(operator)),
            Type::Star => (left * right).ok_or_else(|| number_operands_error(operator)),
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            _ => unreachable!(),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(grouping) = expr else { unreachable!() };
        self.evaluate(&grouping.expr)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(call) = expr else { unreachable!() };

        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        match callee {
            Object::Function(function) => call_checked(&function, self, arguments, &call.paren),
            Object::NativeFunction(function) => call_checked(&function, self, arguments, &call.paren),
            Object::Class(class) => {
                check_arity(class.borrow().arity(), arguments.len(), &call.paren)?;
                Class::instantiate(&class, self, arguments)
            }
            _ => Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Get(get) = expr else { unreachable!() };

        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            Object::Class(class) => class
                .borrow()
                .get_class_method(&get.name.lexeme)
                .map(Object::from)
                .ok_or_else(|| RuntimeError {
                    token: get.name.clone(),
                    message: format!("Undefined property '{}'.", get.name.lexeme),
                }),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Set(set) = expr else { unreachable!() };

        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::This(this) = expr else { unreachable!() };
        self.lookup_variable(&this.keyword)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        let distance = *self
            .locals
            .get(&super_expr.keyword)
            .expect("resolver always resolves 'super'");

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword)?;
        let Object::Class(superclass) = superclass else {
            unreachable!("'super' always resolves to a class")
        };

        // `this` is always bound one environment closer than `super` (see the class
        // statement's two nested environments), so its distance is one less.
        let this_token = Token::from("this");
        let instance = self.environment.borrow().get_at(distance - 1, &this_token)?;

        superclass
            .borrow()
            .get_method(&super_expr.method.lexeme)
            .map(|method| Object::from(method.bind(instance)))
            .ok_or_else(|| RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            })
    }

    fn visit_ternary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Ternary(ternary) = expr else { unreachable!() };

        if self.evaluate(&ternary.condition)?.truthy() {
            self.evaluate(&ternary.then_branch)
        } else {
            self.evaluate(&ternary.else_branch)
        }
    }

    fn visit_function_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Function(data) = expr else { unreachable!() };

        let function = Function::new(
            data.keyword.clone(),
            data.params.clone(),
            data.body.clone(),
            Rc::clone(&self.environment),
            false,
        );

        Ok(Object::from(function))
    }
}

impl StmtVisitor<Result<(), Unwind>> for Interpreter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        let _ = writeln!(self.output, "{value}");
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        match &data.initializer {
            Some(initializer) => {
                let value = self.evaluate(initializer)?;
                self.environment.borrow_mut().define(&data.name.lexeme, value);
            }
            None => self.environment.borrow_mut().declare(&data.name.lexeme),
        }

        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        self.execute_block(&data.statements, environment)
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.truthy() {
            match self.execute(&data.body) {
                Ok(()) => {}
                Err(Unwind::Break) => break,
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }

    fn visit_break_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Break(_) = stmt else { unreachable!() };
        Err(Unwind::Break)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(
            data.name.clone(),
            data.params.clone(),
            data.body.clone(),
            Rc::clone(&self.environment),
            false,
        );
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));

        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        trace!("defining class {}", data.name.lexeme);

        let superclass = match &data.superclass {
            Some(superclass_expr) => {
                let Expr::Variable(var) = superclass_expr else { unreachable!() };
                let value = self.evaluate(superclass_expr)?;
                let Object::Class(class) = value else {
                    return Err(Unwind::Error(RuntimeError {
                        token: var.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    }));
                };
                Some(class)
            }
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let enclosing = superclass.as_ref().map(|superclass| {
            let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
            environment.borrow_mut().define("super", Object::Class(Rc::clone(superclass)));
            mem::replace(&mut self.environment, environment)
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function_data) = method else { unreachable!() };
            let is_initializer = function_data.name.lexeme == "init";
            let function = Function::new(
                function_data.name.clone(),
                function_data.params.clone(),
                function_data.body.clone(),
                Rc::clone(&self.environment),
                is_initializer,
            );
            methods.insert(function_data.name.lexeme.clone(), function);
        }

        let mut class_methods = HashMap::new();
        for method in &data.class_methods {
            let Stmt::Function(function_data) = method else { unreachable!() };
            let function = Function::new(
                function_data.name.clone(),
                function_data.params.clone(),
                function_data.body.clone(),
                Rc::clone(&self.environment),
                false,
            );
            class_methods.insert(function_data.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods, class_methods);

        if let Some(previous) = enclosing {
            self.environment = previous;
        }

        self.environment
            .borrow_mut()
            .assign(&data.name, Object::Class(Rc::new(RefCell::new(class))))?;

        Ok(())
    }
}
