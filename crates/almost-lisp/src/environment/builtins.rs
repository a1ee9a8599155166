//! Built-in functions and the base environment

use super::Environment;
use crate::entity::Entity;
use crate::error::EvalError;

impl Environment {
    /// Create an environment holding every built-in function.
    pub fn with_builtins() -> Self {
        let mut env = Self::new();
        env.load_builtins();
        env
    }

    /// Register the built-in functions into this environment.
    ///
    /// Existing bindings with the same names are replaced.
    pub fn load_builtins(&mut self) {
        // Arithmetic
        self.define_builtin("+", builtin_add);
        self.define_builtin("-", builtin_subtract);
        self.define_builtin("*", builtin_multiply);
        self.define_builtin("^", builtin_power);

        // Derived
        self.define_builtin("x^2+y^2", builtin_sum_of_squares);
    }
}

/// Build the base environment: the built-in table, ready to evaluate with.
pub fn base_environment() -> Environment {
    Environment::with_builtins()
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Checking
// ═══════════════════════════════════════════════════════════════════════

/// Fail with `ArgumentArity` unless exactly `expected` arguments arrived.
pub fn expect_arity(function: &str, args: &[Entity], expected: usize) -> Result<(), EvalError> {
    if args.len() != expected {
        return Err(EvalError::ArgumentArity {
            function: function.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Extract the integer at `position`, or fail with `ArgumentType`.
pub fn expect_integer(function: &str, args: &[Entity], position: usize) -> Result<i64, EvalError> {
    let Some(arg) = args.get(position) else {
        return Err(EvalError::ArgumentArity {
            function: function.to_string(),
            expected: position + 1,
            got: args.len(),
        });
    };
    arg.as_integer().ok_or_else(|| EvalError::ArgumentType {
        function: function.to_string(),
        position,
        expected: "Integer".to_string(),
        got: arg.kind(),
    })
}

/// Check arity 2 and extract both integer operands.
fn integer_pair(function: &str, args: &[Entity]) -> Result<(i64, i64), EvalError> {
    expect_arity(function, args, 2)?;
    Ok((
        expect_integer(function, args, 0)?,
        expect_integer(function, args, 1)?,
    ))
}

fn overflow(function: &str) -> EvalError {
    EvalError::Overflow {
        function: function.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_add(_env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
    let (a, b) = integer_pair("+", &args)?;
    a.checked_add(b)
        .map(Entity::Integer)
        .ok_or_else(|| overflow("+"))
}

fn builtin_subtract(_env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
    let (a, b) = integer_pair("-", &args)?;
    a.checked_sub(b)
        .map(Entity::Integer)
        .ok_or_else(|| overflow("-"))
}

fn builtin_multiply(_env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
    let (a, b) = integer_pair("*", &args)?;
    a.checked_mul(b)
        .map(Entity::Integer)
        .ok_or_else(|| overflow("*"))
}

fn builtin_power(_env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
    let (base, exponent) = integer_pair("^", &args)?;

    let exponent = match u32::try_from(exponent) {
        Ok(exponent) => exponent,
        // Negative powers leave the integers
        Err(_) if exponent < 0 => {
            return Err(EvalError::ArgumentType {
                function: "^".to_string(),
                position: 1,
                expected: "non-negative Integer".to_string(),
                got: "Integer",
            })
        }
        Err(_) => {
            return match base {
                0 | 1 => Ok(Entity::Integer(base)),
                -1 if exponent % 2 == 0 => Ok(Entity::Integer(1)),
                -1 => Ok(Entity::Integer(-1)),
                _ => Err(overflow("^")),
            }
        }
    };

    base.checked_pow(exponent)
        .map(Entity::Integer)
        .ok_or_else(|| overflow("^"))
}

/// `(x^2+y^2 x y)` rewrites to `(+ (^ x 2) (^ y 2))` and lets the
/// engine finish the job.
fn builtin_sum_of_squares(_env: &Environment, args: Vec<Entity>) -> Result<Entity, EvalError> {
    let [x, y]: [Entity; 2] = args.try_into().map_err(|args: Vec<Entity>| {
        EvalError::ArgumentArity {
            function: "x^2+y^2".to_string(),
            expected: 2,
            got: args.len(),
        }
    })?;

    let square = |operand: Entity| {
        Entity::apply(Entity::name("^"), vec![operand, Entity::Integer(2)])
    };
    Ok(Entity::apply(Entity::name("+"), vec![square(x), square(y)]))
}
