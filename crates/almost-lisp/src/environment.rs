//! Name-to-entity bindings used to resolve free names

pub mod builtins;

use indexmap::IndexMap;
use log::debug;

use crate::entity::{Entity, Function};
use crate::error::EvalError;

/// The mapping from identifiers to entities.
///
/// Keys are unique and matched exactly. Defining an existing name
/// replaces its binding (last definition wins). Iteration follows
/// definition order.
///
/// The reduction engine only reads from an environment; hosts build one
/// up front and pass it to every evaluation.
///
/// # Example
///
/// ```
/// use almost_lisp::{Entity, Environment};
///
/// let mut env = Environment::new();
/// env.define("a", Entity::Integer(42));
/// env.define("b", Entity::name("a"));
///
/// assert_eq!(env.get("a"), Some(&Entity::Integer(42)));
/// assert_eq!(Entity::name("b").reduce(&env).unwrap(), Entity::Integer(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: IndexMap<String, Entity>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` to `entity`, returning the binding it replaced.
    pub fn define(&mut self, name: impl Into<String>, entity: Entity) -> Option<Entity> {
        let name = name.into();
        let previous = self.bindings.insert(name.clone(), entity);
        if previous.is_some() {
            debug!("binding `{}` overwritten", name);
        }
        previous
    }

    /// Register a native function under `name`.
    pub fn define_builtin<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&Environment, Vec<Entity>) -> Result<Entity, EvalError> + Send + Sync + 'static,
    {
        let function = Function::new(name, func);
        self.define(function.name.clone(), Entity::Function(function));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.bindings.get(name)
    }

    /// Resolve `name` to an owned copy of its binding.
    ///
    /// # Errors
    ///
    /// `UnboundName` if nothing is bound to `name`.
    pub fn lookup(&self, name: &str) -> Result<Entity, EvalError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnboundName {
                name: name.to_string(),
            })
    }

    /// Check if a binding exists.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Iterate over all bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.bindings.iter().map(|(name, entity)| (name.as_str(), entity))
    }

    /// Get all binding names (for completion).
    pub fn names(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<S: Into<String>> Extend<(S, Entity)> for Environment {
    fn extend<I: IntoIterator<Item = (S, Entity)>>(&mut self, iter: I) {
        for (name, entity) in iter {
            self.define(name, entity);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Entity)> for Environment {
    fn from_iter<I: IntoIterator<Item = (S, Entity)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}
