//! Unary operator implementations.
//!
//! Direct enum-based dispatch, as for binary operators.

use crate::errors::{type_mismatch, RuntimeResult};
use crate::value::Value;

/// Operations taking one operand and producing one value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> RuntimeResult<Value> {
    match (value, op) {
        // Integer negation wraps like the other integer arithmetic.
        (Value::Int(n), UnaryOp::Neg) => Ok(Value::Int(n.wrapping_neg())),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        (_, UnaryOp::Neg) => Err(type_mismatch("neg", "a number", value.type_name())),
        (_, UnaryOp::Not) => Err(type_mismatch("not", "a boolean", value.type_name())),
    }
}
