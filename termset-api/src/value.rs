//! HostValue - the host-neutral boundary term shape
//!
//! Hosts exchange terms with the facade in this encoded form. It is a
//! superset of what the container stores: the refused shapes (`Float`,
//! `Pid`, `Reference`, `Port`, `Function`) exist so the boundary can name
//! what it is rejecting instead of failing opaquely. Decoding moves the
//! value in and either produces an owned [`Term`] or an
//! `unsupported_type` error; a refused shape anywhere inside a composite
//! poisons the whole value.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use termset_core::Term;

/// Encoded term shape at the host boundary
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HostValue {
    /// Signed 64-bit integer
    Integer(i64),
    /// Symbol identified by a UTF-8 byte sequence
    Atom(String),
    /// UTF-8 validated byte sequence
    Bitstring(String),
    /// Fixed-length ordered sequence of encoded terms
    Tuple(Vec<HostValue>),
    /// Variable-length ordered sequence of encoded terms
    List(Vec<HostValue>),

    // Shapes the container refuses; decoding any of these (at any depth)
    // fails with `unsupported_type`.
    /// 64-bit float, refused
    Float(f64),
    /// Process handle, refused
    Pid,
    /// Opaque reference, refused
    Reference,
    /// Port handle, refused
    Port,
    /// Function value, refused
    Function,
}

impl HostValue {
    /// Decode into an owned internal term, consuming the value
    pub fn decode(self) -> Result<Term> {
        match self {
            HostValue::Integer(i) => Ok(Term::Integer(i)),
            HostValue::Atom(name) => Ok(Term::Atom(name)),
            HostValue::Bitstring(payload) => Ok(Term::Bitstring(payload)),
            HostValue::Tuple(elements) => elements
                .into_iter()
                .map(HostValue::decode)
                .collect::<Result<Vec<_>>>()
                .map(Term::Tuple),
            HostValue::List(elements) => elements
                .into_iter()
                .map(HostValue::decode)
                .collect::<Result<Vec<_>>>()
                .map(Term::List),
            HostValue::Float(_) => Err(ApiError::UnsupportedType("float")),
            HostValue::Pid => Err(ApiError::UnsupportedType("pid")),
            HostValue::Reference => Err(ApiError::UnsupportedType("reference")),
            HostValue::Port => Err(ApiError::UnsupportedType("port")),
            HostValue::Function => Err(ApiError::UnsupportedType("function")),
        }
    }

    /// Encode an internal term back into the boundary shape
    pub fn encode(term: &Term) -> HostValue {
        match term {
            Term::Integer(i) => HostValue::Integer(*i),
            Term::Atom(name) => HostValue::Atom(name.clone()),
            Term::Bitstring(payload) => HostValue::Bitstring(payload.clone()),
            Term::Tuple(elements) => {
                HostValue::Tuple(elements.iter().map(HostValue::encode).collect())
            }
            Term::List(elements) => {
                HostValue::List(elements.iter().map(HostValue::encode).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_scalars() {
        assert_eq!(HostValue::Integer(7).decode().unwrap(), Term::Integer(7));
        assert_eq!(
            HostValue::Atom("ok".to_string()).decode().unwrap(),
            Term::Atom("ok".to_string())
        );
        assert_eq!(
            HostValue::Bitstring("payload".to_string()).decode().unwrap(),
            Term::Bitstring("payload".to_string())
        );
    }

    #[test]
    fn decode_composites() {
        let value = HostValue::Tuple(vec![
            HostValue::Atom("pair".to_string()),
            HostValue::List(vec![HostValue::Integer(1), HostValue::Integer(2)]),
        ]);
        let term = value.decode().unwrap();
        assert_eq!(
            term,
            Term::Tuple(vec![
                Term::Atom("pair".to_string()),
                Term::List(vec![Term::Integer(1), Term::Integer(2)]),
            ])
        );
    }

    #[test]
    fn refused_shapes_fail_flat() {
        assert_eq!(
            HostValue::Float(1.5).decode(),
            Err(ApiError::UnsupportedType("float"))
        );
        assert_eq!(HostValue::Pid.decode(), Err(ApiError::UnsupportedType("pid")));
        assert_eq!(
            HostValue::Reference.decode(),
            Err(ApiError::UnsupportedType("reference"))
        );
        assert_eq!(HostValue::Port.decode(), Err(ApiError::UnsupportedType("port")));
        assert_eq!(
            HostValue::Function.decode(),
            Err(ApiError::UnsupportedType("function"))
        );
    }

    #[test]
    fn refused_shapes_poison_composites() {
        let value = HostValue::List(vec![
            HostValue::Integer(1),
            HostValue::Tuple(vec![HostValue::Atom("f".to_string()), HostValue::Float(0.1)]),
        ]);
        assert_eq!(value.decode(), Err(ApiError::UnsupportedType("float")));
    }

    #[test]
    fn encode_round_trips_supported_terms() {
        let term = Term::Tuple(vec![
            Term::Atom("k".to_string()),
            Term::List(vec![Term::Integer(9), Term::Bitstring("x".to_string())]),
        ]);
        let encoded = HostValue::encode(&term);
        assert_eq!(encoded.decode().unwrap(), term);
    }
}
