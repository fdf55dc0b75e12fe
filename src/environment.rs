use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A variable binding is either waiting to be initialized (`var x;` with no
/// initializer) or holds a value. Reading an `Uninitialized` slot is a runtime error
/// rather than silently producing `nil`.
#[derive(Debug, Clone)]
pub enum Slot {
    Uninitialized,
    Value(Object),
}

/// One lexical scope's variable bindings, linked to its enclosing scope to form the
/// environment chain. Function closures hold their own `Rc<RefCell<Environment>>` into
/// this chain.
#[derive(Debug, Clone)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Slot>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            values: HashMap::new(),
        }
    }

    /// Binds `name` to an uninitialized slot, e.g. for `var x;`.
    pub fn declare(&mut self, name: &str) {
        self.values.insert(name.to_string(), Slot::Uninitialized);
    }

    /// Binds `name` to a value, overwriting any existing binding in this scope.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), Slot::Value(value));
    }

    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self
            .enclosing
            .clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth 1"));

        for i in 1..distance {
            let parent = environment
                .borrow()
                .enclosing
                .clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", i + 1));
            environment = parent;
        }

        environment
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), Slot::Value(value));
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(undefined(name))
    }

    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance)
                .borrow_mut()
                .values
                .insert(name.lexeme.clone(), Slot::Value(value));
        } else {
            self.values.insert(name.lexeme.clone(), Slot::Value(value));
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(slot) = self.values.get(&name.lexeme) {
            return read(slot, name);
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(undefined(name))
    }

    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        if distance > 0 {
            let ancestor = self.ancestor(distance);
            let borrowed = ancestor.borrow();
            match borrowed.values.get(&name.lexeme) {
                Some(slot) => read(slot, name),
                None => Err(undefined(name)),
            }
        } else {
            match self.values.get(&name.lexeme) {
                Some(slot) => read(slot, name),
                None => Err(undefined(name)),
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

fn read(slot: &Slot, name: &Token) -> Result<Object, RuntimeError> {
    match slot {
        Slot::Value(value) => Ok(value.clone()),
        Slot::Uninitialized => Err(RuntimeError {
            token: name.clone(),
            message: format!("Variable '{}' used before it was initialized.", name.lexeme),
        }),
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError {
        token: name.clone(),
        message: format!("Undefined variable '{}'.", name.lexeme),
    }
}
