//! Conversion from raw syntax to entities
//!
//! One entity per syntax node: integer tokens become `Integer`, string
//! tokens are JSON-decoded into `String`, identifiers become `Name`, and a
//! parenthesized group becomes a `Call` whose first child is the callee.

use log::debug;

use crate::entity::Entity;
use crate::error::ParseError;
use crate::syntax::{self, Program, Syntax};

/// Convert every top-level expression of `program`.
pub fn transform(program: Program) -> Result<Vec<Entity>, ParseError> {
    program.expressions.into_iter().map(transform_node).collect()
}

/// Convert a single syntax node and its children.
pub fn transform_node(node: Syntax) -> Result<Entity, ParseError> {
    match node {
        Syntax::Integer(token) => token
            .parse::<i64>()
            .map(Entity::Integer)
            .map_err(|_| ParseError::IntegerOutOfRange { literal: token }),
        Syntax::String(token) => match serde_json::from_str::<String>(&token) {
            Ok(text) => Ok(Entity::string(text)),
            Err(err) => Err(ParseError::InvalidString {
                literal: token,
                reason: err.to_string(),
            }),
        },
        Syntax::Name(identifier) => Ok(Entity::Name(identifier)),
        Syntax::Call(children) => {
            let mut children = children.into_iter().map(transform_node);
            let callee = match children.next() {
                Some(callee) => callee?,
                None => {
                    return Err(ParseError::Syntax {
                        offset: 0,
                        message: "empty call".to_string(),
                    })
                }
            };
            let args = children.collect::<Result<Vec<_>, _>>()?;
            Ok(Entity::apply(callee, args))
        }
    }
}

/// Parse `source` and convert it to entities in one go.
pub fn parse_entities(source: &str) -> Result<Vec<Entity>, ParseError> {
    let program = syntax::parse(source)?;
    debug!("parsed {} top-level expression(s)", program.expressions.len());
    transform(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_literals() {
        assert_eq!(
            parse_entities(r#"42 -3 "a\tb" name"#).unwrap(),
            vec![
                Entity::Integer(42),
                Entity::Integer(-3),
                Entity::string("a\tb"),
                Entity::name("name"),
            ]
        );
    }

    #[test]
    fn test_transform_call_shape() {
        let entities = parse_entities("(x^2+y^2 2 (+ 1 2))").unwrap();
        assert_eq!(
            entities,
            vec![Entity::apply(
                Entity::name("x^2+y^2"),
                vec![
                    Entity::Integer(2),
                    Entity::apply(Entity::name("+"), vec![Entity::Integer(1), Entity::Integer(2)]),
                ],
            )]
        );
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(
            parse_entities(r#""caf\u00e9""#).unwrap(),
            vec![Entity::string("café")]
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        assert_eq!(
            parse_entities("99999999999999999999").unwrap_err(),
            ParseError::IntegerOutOfRange {
                literal: "99999999999999999999".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_escape() {
        let err = parse_entities(r#""bad \q""#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidString { literal, .. } if literal == r#""bad \q""#));
    }

    #[test]
    fn test_empty_call_node() {
        assert!(matches!(
            transform_node(Syntax::Call(vec![])),
            Err(ParseError::Syntax { .. })
        ));
    }
}
