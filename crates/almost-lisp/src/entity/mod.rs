//! Runtime entities: the values and expressions of the language

mod display;
mod function;
mod impls;

pub use function::{Function, NativeFnPtr};

use std::sync::Arc;

use log::debug;

use crate::environment::Environment;
use crate::error::EvalError;
use crate::reduce::reduce;

/// Any runtime value or expression.
///
/// The set of variants is closed: every dispatch point (one-step
/// reduction and invocation) matches on all five of them.
///
/// Entities are immutable. Reducing one consumes it and produces either
/// the same entity back (it is final) or a replacement.
#[derive(Clone)]
pub enum Entity {
    /// Signed 64-bit integer literal
    Integer(i64),

    /// Immutable text
    String(Arc<String>),

    /// Reference to a binding in the environment
    Name(String),

    /// Callable native function
    Function(Function),

    /// Application of a callee to unevaluated arguments
    Call(Call),
}

/// A call expression `(callee arg...)`.
///
/// Owns its callee and arguments exclusively.
#[derive(Clone)]
pub struct Call {
    /// Entity in function position
    pub callee: Box<Entity>,

    /// Argument entities, left to right, not yet reduced
    pub args: Vec<Entity>,
}

impl Call {
    /// Create a call expression.
    pub fn new(callee: Entity, args: Vec<Entity>) -> Self {
        Self {
            callee: Box::new(callee),
            args,
        }
    }
}

/// Outcome of a single reduction transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The entity cannot be reduced further; it is handed back unchanged
    Final(Entity),

    /// The entity was replaced by a new state
    Reduced(Entity),
}

impl Step {
    /// The entity carried by this step, final or not.
    pub fn into_entity(self) -> Entity {
        match self {
            Step::Final(entity) | Step::Reduced(entity) => entity,
        }
    }

    /// Whether the step signalled finality.
    pub fn is_final(&self) -> bool {
        matches!(self, Step::Final(_))
    }
}

impl Entity {
    /// Perform exactly one reduction transition.
    ///
    /// Literals and functions are final. A name resolves through `env`.
    /// A call fully reduces its callee, then invokes it with the
    /// arguments still unevaluated.
    ///
    /// # Errors
    ///
    /// - `UnboundName` when a name is missing from `env`
    /// - whatever invoking the callee raises
    pub fn compute_one_step(self, env: &Environment) -> Result<Step, EvalError> {
        match self {
            Entity::Integer(_) | Entity::String(_) | Entity::Function(_) => Ok(Step::Final(self)),
            Entity::Name(name) => env.lookup(&name).map(Step::Reduced),
            Entity::Call(Call { callee, args }) => {
                let callee = reduce(*callee, env)?;
                callee.call(env, args).map(Step::Reduced)
            }
        }
    }

    /// Invoke this entity with unevaluated `args`.
    ///
    /// Only `Function` is callable.
    ///
    /// # Errors
    ///
    /// Returns `NotCallable` for every other kind.
    pub fn call(self, env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
        match self {
            Entity::Function(function) => function.call(env, args),
            Entity::Integer(_) | Entity::String(_) | Entity::Name(_) | Entity::Call(_) => {
                debug!("refusing to call {:?}", self);
                Err(EvalError::NotCallable { kind: self.kind() })
            }
        }
    }

    /// Fully reduce this entity. See [`reduce`].
    pub fn reduce(self, env: &Environment) -> Result<Entity, EvalError> {
        reduce(self, env)
    }

    /// Name of this entity's variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Integer(_) => "Integer",
            Entity::String(_) => "String",
            Entity::Name(_) => "Name",
            Entity::Function(_) => "Function",
            Entity::Call(_) => "Call",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_final_in_one_step() {
        let env = Environment::new();
        let step = Entity::Integer(1).compute_one_step(&env).unwrap();
        assert!(step.is_final());
        assert_eq!(step.into_entity(), Entity::Integer(1));

        let step = Entity::string("hi").compute_one_step(&env).unwrap();
        assert_eq!(step, Step::Final(Entity::string("hi")));
    }

    #[test]
    fn test_name_takes_exactly_one_step() {
        let mut env = Environment::new();
        env.define("a", Entity::Integer(42));
        env.define("b", Entity::name("a"));

        let step = Entity::name("b").compute_one_step(&env).unwrap();
        assert_eq!(step, Step::Reduced(Entity::name("a")));
    }

    #[test]
    fn test_unbound_name_step_fails() {
        let env = Environment::new();
        let err = Entity::name("nope").compute_one_step(&env).unwrap_err();
        assert_eq!(
            err,
            EvalError::UnboundName {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_call_on_non_functions() {
        let env = Environment::new();
        for entity in [
            Entity::Integer(1),
            Entity::string("s"),
            Entity::name("f"),
            Entity::apply(Entity::name("f"), vec![]),
        ] {
            let kind = entity.kind();
            let err = entity.call(&env, vec![]).unwrap_err();
            assert_eq!(err, EvalError::NotCallable { kind });
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Entity::Integer(0).kind(), "Integer");
        assert_eq!(Entity::string("").kind(), "String");
        assert_eq!(Entity::name("x").kind(), "Name");
        assert_eq!(Entity::apply(Entity::Integer(1), vec![]).kind(), "Call");
    }
}
