//! Native callable functions

use std::fmt;
use std::sync::Arc;

use log::debug;

use super::Entity;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::reduce::reduce;

/// Type alias for native function pointers.
///
/// The implementation receives the environment and its arguments already
/// reduced. It may return a final value or a further-reducible expression.
pub type NativeFnPtr =
    Arc<dyn Fn(&Environment, Vec<Entity>) -> Result<Entity, EvalError> + Send + Sync>;

/// A native function exposed to the language.
///
/// Arity and argument kinds are checked by the implementation itself when
/// it runs; there is no separate signature metadata.
#[derive(Clone)]
pub struct Function {
    /// Function name (for display/debugging)
    pub name: String,

    /// The native implementation
    pub func: NativeFnPtr,
}

impl Function {
    /// Wrap a native implementation under `name`.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Environment, Vec<Entity>) -> Result<Entity, EvalError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Invoke with unevaluated `args`.
    ///
    /// Arguments are reduced to finality left to right under `env`
    /// before the implementation runs. The first failing argument aborts
    /// the call; later arguments are not touched.
    pub fn call(&self, env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
        let args = args
            .into_iter()
            .map(|arg| reduce(arg, env))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("invoking `{}` with {} argument(s)", self.name, args.len());
        (self.func)(env, args)
    }

    /// Whether two handles share the same native implementation.
    pub fn same_implementation(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:?})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_args() -> Function {
        Function::new("count", |_env, args| Ok(Entity::Integer(args.len() as i64)))
    }

    #[test]
    fn test_call_passes_reduced_arguments() {
        let mut env = Environment::new();
        env.define("x", Entity::Integer(3));

        let echo = Function::new("first", |_env, mut args| Ok(args.remove(0)));
        let result = echo.call(&env, vec![Entity::name("x")]).unwrap();
        assert_eq!(result, Entity::Integer(3));
    }

    #[test]
    fn test_argument_failure_skips_implementation() {
        let env = Environment::new();
        let result = count_args().call(&env, vec![Entity::Integer(1), Entity::name("missing")]);
        assert!(matches!(result, Err(EvalError::UnboundName { .. })));
    }

    #[test]
    fn test_same_implementation() {
        let a = count_args();
        let b = a.clone();
        assert!(a.same_implementation(&b));
        assert!(!a.same_implementation(&count_args()));
    }

    #[test]
    fn test_debug_shows_name() {
        assert_eq!(format!("{:?}", count_args()), "Function(\"count\")");
    }
}
