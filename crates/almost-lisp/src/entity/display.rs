//! Display and Debug implementations for Entity

use std::fmt;

use super::*;

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Integer(n) => write!(f, "Integer({})", n),
            Entity::String(s) => write!(f, "String({:?})", s.as_str()),
            Entity::Name(name) => write!(f, "Name({})", name),
            Entity::Function(func) => fmt::Debug::fmt(func, f),
            Entity::Call(call) => {
                write!(f, "Call({}", call.callee)?;
                for arg in &call.args {
                    write!(f, ", {:?}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Entity {
    // Source syntax, so printed results can be read back in
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Integer(n) => write!(f, "{}", n),
            Entity::String(s) => {
                let quoted = serde_json::to_string(s.as_str()).map_err(|_| fmt::Error)?;
                write!(f, "{}", quoted)
            }
            Entity::Name(name) => write!(f, "{}", name),
            Entity::Function(func) => write!(f, "<builtin {}>", func.name),
            Entity::Call(call) => {
                write!(f, "({}", call.callee)?;
                for arg in &call.args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Entity::Call(self.clone()), f)
    }
}
