//! Textual rendering of values for `print`.
//!
//! - Integers print in decimal.
//! - Floats use the C `%g` general format: six significant digits, no
//!   trailing zeros, exponent form for very small or large magnitudes.
//! - Booleans print as the session's configured literal words.
//! - Strings print raw.
//! - Lists print as `[` items separated by single spaces `]`.
//!
//! Lists may contain themselves. The renderer tracks the lists on the
//! current path and reports [`RuntimeError::CycleDetected`] instead of
//! recursing forever; a list that merely appears twice side by side is
//! not a cycle and prints twice.

use kapila_stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;

use crate::arena::Arena;
use crate::config::BoolLiterals;
use crate::errors::{RuntimeError, RuntimeResult};
use crate::value::{ListId, Value};

/// Significant digits produced by [`format_general`].
const GENERAL_PRECISION: i32 = 6;

/// Render `value` as `print` would.
pub fn render_value(value: Value, arena: &Arena, literals: &BoolLiterals) -> RuntimeResult<String> {
    let mut renderer = Renderer::new(arena, literals);
    renderer.value(value)?;
    Ok(renderer.out)
}

/// Render a sequence of values as a bracketed, space-separated list.
pub fn render_sequence(
    values: &[Value],
    arena: &Arena,
    literals: &BoolLiterals,
) -> RuntimeResult<String> {
    let mut renderer = Renderer::new(arena, literals);
    renderer.items(values)?;
    Ok(renderer.out)
}

struct Renderer<'a> {
    arena: &'a Arena,
    literals: &'a BoolLiterals,
    /// Lists currently being rendered, outermost first.
    path: FxHashSet<ListId>,
    out: String,
}

impl<'a> Renderer<'a> {
    fn new(arena: &'a Arena, literals: &'a BoolLiterals) -> Self {
        Renderer {
            arena,
            literals,
            path: FxHashSet::default(),
            out: String::new(),
        }
    }

    fn value(&mut self, value: Value) -> RuntimeResult<()> {
        match value {
            Value::Int(n) => self.out.push_str(&n.to_string()),
            Value::Float(f) => self.out.push_str(&format_general(f)),
            Value::Bool(b) => self.out.push_str(self.literals.word(b)),
            Value::Str(s) => self.out.push_str(self.arena.resolve(s)?),
            Value::List(id) => self.list(id)?,
        }
        Ok(())
    }

    fn list(&mut self, id: ListId) -> RuntimeResult<()> {
        ensure_sufficient_stack(|| {
            if !self.path.insert(id) {
                return Err(RuntimeError::CycleDetected);
            }
            let arena = self.arena;
            self.items(arena.list_items(id)?)?;
            self.path.remove(&id);
            Ok(())
        })
    }

    fn items(&mut self, items: &[Value]) -> RuntimeResult<()> {
        self.out.push('[');
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.value(item)?;
        }
        self.out.push(']');
        Ok(())
    }
}

/// Format a float like C's `printf("%g", f)`.
pub fn format_general(f: f64) -> String {
    if f.is_nan() {
        return if f.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round to the target precision first: the exponent of the rounded
    // value decides between fixed and exponent notation.
    let digits = (GENERAL_PRECISION - 1).unsigned_abs() as usize;
    let scientific = format!("{f:.digits$e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };

    if exp < -4 || exp >= GENERAL_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        let mantissa = strip_trailing_zeros(mantissa);
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        let decimals = usize::try_from(GENERAL_PRECISION - 1 - exp).unwrap_or(0);
        strip_trailing_zeros(&format!("{f:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
