//! Entity trait implementations: constructors, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Entity {
    /// Create a string entity
    pub fn string(s: impl Into<String>) -> Self {
        Entity::String(Arc::new(s.into()))
    }

    /// Create a name entity
    pub fn name(identifier: impl Into<String>) -> Self {
        Entity::Name(identifier.into())
    }

    /// Create a call expression
    pub fn apply(callee: Entity, args: Vec<Entity>) -> Self {
        Entity::Call(Call::new(callee, args))
    }

    /// Create a native function entity
    pub fn function<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Environment, Vec<Entity>) -> Result<Entity, EvalError> + Send + Sync + 'static,
    {
        Entity::Function(Function::new(name, func))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Extract integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Entity::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Entity::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract the identifier of a name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Entity::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Check if the entity can be invoked
    pub fn is_callable(&self) -> bool {
        matches!(self, Entity::Function(_))
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Entity::Integer(a), Entity::Integer(b)) => a == b,
            (Entity::String(a), Entity::String(b)) => a == b,
            (Entity::Name(a), Entity::Name(b)) => a == b,
            // Functions compare by identity of the native implementation
            (Entity::Function(a), Entity::Function(b)) => a.same_implementation(b),
            (Entity::Call(a), Entity::Call(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        self.callee == other.callee && self.args == other.args
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<i64> for Entity {
    fn from(n: i64) -> Self {
        Entity::Integer(n)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Entity::string(s)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity::String(Arc::new(s))
    }
}

impl From<Function> for Entity {
    fn from(func: Function) -> Self {
        Entity::Function(func)
    }
}

impl From<Call> for Entity {
    fn from(call: Call) -> Self {
        Entity::Call(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_equality_for_literals() {
        assert_eq!(Entity::Integer(1), Entity::Integer(1));
        assert_ne!(Entity::Integer(1), Entity::Integer(2));
        assert_eq!(Entity::string("a"), Entity::from("a"));
        assert_ne!(Entity::string("1"), Entity::Integer(1));
        assert_ne!(Entity::string("a"), Entity::name("a"));
    }

    #[test]
    fn test_function_identity() {
        let f = Function::new("f", |_env, _args| Ok(Entity::Integer(0)));
        let g = Function::new("f", |_env, _args| Ok(Entity::Integer(0)));
        assert_eq!(Entity::from(f.clone()), Entity::from(f.clone()));
        assert_ne!(Entity::from(f), Entity::from(g));
    }

    #[test]
    fn test_extractors() {
        assert_eq!(Entity::Integer(5).as_integer(), Some(5));
        assert_eq!(Entity::string("x").as_integer(), None);
        assert_eq!(Entity::from(String::from("s")).as_str(), Some("s"));
        assert_eq!(Entity::name("n").as_name(), Some("n"));
        assert!(!Entity::Integer(5).is_callable());
        assert!(Entity::function("f", |_env, _args| Ok(Entity::Integer(0))).is_callable());
    }

    #[test]
    fn test_call_structural_equality() {
        let a = Entity::apply(Entity::name("+"), vec![Entity::from(1), Entity::from(2)]);
        let b = Entity::apply(Entity::name("+"), vec![Entity::from(1), Entity::from(2)]);
        let c = Entity::apply(Entity::name("+"), vec![Entity::from(2), Entity::from(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
