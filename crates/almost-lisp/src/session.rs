//! Evaluation of whole programs against one environment

use log::debug;

use crate::entity::Entity;
use crate::environment::Environment;
use crate::error::{self, EvalError, ParseError};
use crate::reduce::{reduce, reduce_all};
use crate::transform::parse_entities;

/// Result of reducing one top-level expression.
pub type Outcome = Result<Entity, EvalError>;

/// An environment plus the policy for running programs in it.
///
/// Every top-level expression is reduced on its own: a failure is
/// recorded in that expression's [`Outcome`] and the next expression
/// still runs.
///
/// # Example
///
/// ```
/// use almost_lisp::{Entity, Session};
///
/// let session = Session::new();
/// let outcomes = session.eval_source("(+ 2 5) (nope) (* 3 4)").unwrap();
///
/// assert_eq!(outcomes[0], Ok(Entity::Integer(7)));
/// assert!(outcomes[1].is_err());
/// assert_eq!(outcomes[2], Ok(Entity::Integer(12)));
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session over the built-in environment.
    pub fn new() -> Self {
        Self::with_environment(Environment::with_builtins())
    }

    /// Create a session over a caller-supplied environment.
    pub fn with_environment(env: Environment) -> Self {
        Self { env }
    }

    /// The environment expressions are reduced in.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access, for adding bindings between evaluations.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Reduce one entity.
    pub fn eval_entity(&self, entity: Entity) -> Outcome {
        let outcome = reduce(entity, &self.env);
        if let Err(err) = &outcome {
            debug!("{}", err.diagnostic());
        }
        outcome
    }

    /// Parse `source` and reduce each of its top-level expressions.
    ///
    /// # Errors
    ///
    /// A parse failure rejects the whole source; nothing is evaluated.
    pub fn eval_source(&self, source: &str) -> Result<Vec<Outcome>, ParseError> {
        let entities = parse_entities(source)?;
        debug!("evaluating {} expression(s)", entities.len());
        Ok(entities
            .into_iter()
            .map(|entity| self.eval_entity(entity))
            .collect())
    }

    /// Parse `source` and reduce every expression, stopping at the first
    /// failure of either kind.
    ///
    /// # Errors
    ///
    /// `LispError::Parse` if the source is rejected, otherwise
    /// `LispError::Eval` for the first expression that fails to reduce.
    pub fn eval_all(&self, source: &str) -> error::Result<Vec<Entity>> {
        let entities = parse_entities(source)?;
        Ok(reduce_all(entities, &self.env)?)
    }
}
