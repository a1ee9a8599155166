//! # almost-lisp
//!
//! A reduction-based evaluator for a tiny s-expression language.
//!
//! A program is a sequence of expressions, each an integer, a string, a
//! name or a call `(callee arg...)`. Evaluation is repeated one-step
//! reduction: every [`Entity`] either takes a step or declares itself
//! final, and [`reduce`] iterates until it does.
//!
//! ## Architecture
//!
//! - **Syntax**: source text to a raw tree ([`syntax`])
//! - **Transform**: raw tree to entities ([`transform`])
//! - **Core**: entities, the reduction engine, environments and built-ins
//! - **Session / REPL**: per-expression evaluation and the interactive loop
//!
//! ```
//! use almost_lisp::{parse_entities, reduce, Entity, Environment};
//!
//! let env = Environment::with_builtins();
//! let program = parse_entities("(x^2+y^2 2 5)").unwrap();
//! let results: Vec<_> = program
//!     .into_iter()
//!     .map(|entity| reduce(entity, &env).unwrap())
//!     .collect();
//!
//! assert_eq!(results, vec![Entity::Integer(29)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod environment;
pub mod error;
pub mod reduce;
pub mod repl;
pub mod session;
pub mod syntax;
pub mod transform;

// Re-export main types
pub use entity::{Call, Entity, Function, NativeFnPtr, Step};
pub use environment::builtins::base_environment;
pub use environment::Environment;
pub use error::{EvalError, LispError, ParseError, Result};
pub use reduce::{reduce, reduce_all};
pub use repl::{Repl, ReplConfig};
pub use session::{Outcome, Session};
pub use transform::{parse_entities, transform};

/// almost-lisp version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
