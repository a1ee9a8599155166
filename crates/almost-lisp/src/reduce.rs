//! The reduction engine
//!
//! [`reduce`] drives an entity to its final form by applying
//! [`Entity::compute_one_step`] until the entity reports itself final.
//!
//! There is no step limit. With only the built-ins every call shrinks the
//! expression or produces a value, so reduction terminates as long as the
//! environment has no name that (transitively) resolves to itself. That
//! property belongs to the environment and is not checked here.

use log::trace;

use crate::entity::{Entity, Step};
use crate::environment::Environment;
use crate::error::EvalError;

/// Fully reduce `entity` under `env`.
///
/// # Example
///
/// ```
/// use almost_lisp::{reduce, Entity, Environment};
///
/// let env = Environment::with_builtins();
/// let expr = Entity::apply(Entity::name("*"), vec![Entity::Integer(3), Entity::Integer(4)]);
///
/// assert_eq!(reduce(expr, &env).unwrap(), Entity::Integer(12));
/// ```
///
/// # Errors
///
/// The first failure raised by any step aborts the whole reduction.
pub fn reduce(entity: Entity, env: &Environment) -> Result<Entity, EvalError> {
    let mut state = entity;
    let mut steps = 0usize;

    loop {
        match state.compute_one_step(env)? {
            Step::Final(entity) => {
                trace!("final after {} step(s): {}", steps, entity);
                return Ok(entity);
            }
            Step::Reduced(next) => {
                steps += 1;
                trace!("step {}: {}", steps, next);
                state = next;
            }
        }
    }
}

/// Reduce every entity in order, stopping at the first failure.
pub fn reduce_all(
    entities: impl IntoIterator<Item = Entity>,
    env: &Environment,
) -> Result<Vec<Entity>, EvalError> {
    entities
        .into_iter()
        .map(|entity| reduce(entity, env))
        .collect()
}
