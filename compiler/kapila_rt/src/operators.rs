//! Binary operator implementations.
//!
//! Direct enum-based dispatch over operand pairs. The value set is closed,
//! so pattern matching is preferred over trait objects.
//!
//! Numeric promotion: an Integer meeting a Float is widened to Float.
//! Integer arithmetic wraps on overflow. `div` always produces a Float.

use crate::arena::Arena;
use crate::errors::{binary_type_mismatch, RuntimeError, RuntimeResult};
use crate::value::{Str, Value};

/// Operations taking two operands and producing one value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    And,
    Or,
}

impl BinaryOp {
    /// Word used for this operator in error messages.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Lte => "<=",
            BinaryOp::Gte => ">=",
            BinaryOp::Eq => "=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// Operand kind the operator accepts, for error messages.
    const fn expects(self) -> &'static str {
        match self {
            BinaryOp::Mod => "two integers",
            BinaryOp::Eq => "two numbers, two strings or two booleans",
            BinaryOp::And | BinaryOp::Or => "two booleans",
            _ => "two numbers",
        }
    }
}

/// Evaluate a binary operation.
///
/// The arena is consulted only to compare string contents. Operands are
/// taken by value; a `Value` is a small `Copy` record.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp, arena: &Arena) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(a, b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op),
                _ => Err(mismatch(left, right, op)),
            }
        }
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(a, b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op, arena),
        _ => Err(mismatch(left, right, op)),
    }
}

#[cold]
fn mismatch(left: Value, right: Value, op: BinaryOp) -> RuntimeError {
    binary_type_mismatch(op.symbol(), op.expects(), left.type_name(), right.type_name())
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Int(a.wrapping_add(b))),
        BinaryOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
        BinaryOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
        BinaryOp::Mod => {
            if b == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Int(a.wrapping_rem(b)))
            }
        }
        // Division and ordering are defined on the widened values.
        BinaryOp::Div => Ok(Value::Float(widen(a) / widen(b))),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Lte => Ok(Value::Bool(a <= b)),
        BinaryOp::Gte => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::And | BinaryOp::Or => Err(mismatch(Value::Int(a), Value::Int(b), op)),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer to float widening is the language's promotion rule"
)]
#[inline]
fn widen(n: i64) -> f64 {
    n as f64
}

#[expect(clippy::float_cmp, reason = "`=` compares numeric values exactly")]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Lte => Ok(Value::Bool(a <= b)),
        BinaryOp::Gte => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::Mod | BinaryOp::And | BinaryOp::Or => {
            Err(mismatch(Value::Float(a), Value::Float(b), op))
        }
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> RuntimeResult<Value> {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        _ => Err(mismatch(Value::Bool(a), Value::Bool(b), op)),
    }
}

fn eval_string_binary(a: Str, b: Str, op: BinaryOp, arena: &Arena) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(arena.resolve(a)? == arena.resolve(b)?)),
        _ => Err(mismatch(Value::Str(a), Value::Str(b), op)),
    }
}
