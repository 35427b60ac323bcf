//! Runtime session: the explicit context every operation runs against.
//!
//! A [`Session`] owns an evaluation stack, an arena, the configuration it
//! was built from and a print handler. Independent sessions share nothing.
//!
//! # Lifecycle
//!
//! `new` → operations → [`Session::cleanup`]. `cleanup` releases the arena
//! in one step and may be called any number of times. [`Session::init`]
//! returns a session to its freshly created state.
//!
//! # Failure
//!
//! Every operation validates its operands before touching the stack, so a
//! recoverable error leaves the stack as it was. A fatal error aborts the
//! session: later operations fail with [`RuntimeError::SessionAborted`]
//! until the session is re-initialised or cleaned up.

use tracing::{debug, error, trace};

use crate::arena::Arena;
use crate::config::RuntimeConfig;
use crate::errors::{type_mismatch, RuntimeError, RuntimeResult};
use crate::format::render_value;
use crate::operators::{evaluate_binary, BinaryOp};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stack::EvalStack;
use crate::unary_operators::{evaluate_unary, UnaryOp};
use crate::value::{ListId, Str, Value};

pub struct Session {
    pub(crate) config: RuntimeConfig,
    pub(crate) stack: EvalStack,
    pub(crate) arena: Arena,
    pub(crate) output: SharedPrintHandler,
    aborted: bool,
}

impl Session {
    /// Create a session printing to stdout.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_output(config, stdout_handler())
    }

    /// Create a session printing through `output`.
    pub fn with_output(config: RuntimeConfig, output: SharedPrintHandler) -> Self {
        debug!(
            stack_capacity = config.stack_capacity,
            allocation_limit = config.allocation_limit,
            index_policy = ?config.index_policy,
            "session created"
        );
        Session {
            stack: EvalStack::new(config.stack_capacity),
            arena: Arena::new(config.allocation_limit),
            config,
            output,
            aborted: false,
        }
    }

    /// Reset to an empty, usable session, discarding every value and
    /// allocation made so far.
    pub fn init(&mut self) {
        self.cleanup();
        self.arena.set_limit(self.config.allocation_limit);
        debug!("session initialised");
    }

    /// Release the arena and empty the stack. Handles obtained before the
    /// call become stale. Idempotent.
    pub fn cleanup(&mut self) {
        self.stack.clear();
        self.arena.release_all();
        self.aborted = false;
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[inline]
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Whether a fatal error has aborted this session.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Stack contents from bottom to top.
    #[inline]
    pub fn values(&self) -> &[Value] {
        self.stack.values()
    }

    /// Contents of a string value, literal or arena-owned.
    pub fn str_value(&self, s: Str) -> RuntimeResult<&str> {
        self.arena.resolve(s)
    }

    /// Render `value` exactly as `print` would.
    pub fn display(&self, value: Value) -> RuntimeResult<String> {
        render_value(value, &self.arena, &self.config.bool_literals)
    }

    /// Run one operation: refuse it if the session is aborted, and abort
    /// the session if it fails fatally.
    pub(crate) fn guarded<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> RuntimeResult<T>,
    ) -> RuntimeResult<T> {
        if self.aborted {
            return Err(RuntimeError::SessionAborted);
        }
        trace!(op, depth = self.stack.depth(), "execute");
        let result = f(self);
        self.settle(op, result)
    }

    /// Record a fatal outcome of `op`.
    pub(crate) fn settle<T>(&mut self, op: &'static str, result: RuntimeResult<T>) -> RuntimeResult<T> {
        if let Err(err) = &result {
            if err.is_fatal() && !self.aborted {
                error!(op, %err, "session aborted");
                self.aborted = true;
            }
        }
        result
    }

    // Pushes

    pub fn push(&mut self, value: Value) -> RuntimeResult<()> {
        self.guarded("push", |s| s.stack.push(value))
    }

    pub fn push_int(&mut self, n: i64) -> RuntimeResult<()> {
        self.push(Value::Int(n))
    }

    pub fn push_float(&mut self, f: f64) -> RuntimeResult<()> {
        self.push(Value::Float(f))
    }

    pub fn push_bool(&mut self, b: bool) -> RuntimeResult<()> {
        self.push(Value::Bool(b))
    }

    /// Copy `s` into the arena and push it.
    pub fn push_str(&mut self, s: &str) -> RuntimeResult<()> {
        self.guarded("push", |session| {
            session.stack.ensure_room(1)?;
            let id = session.arena.alloc_str(s)?;
            session.stack.push(Value::Str(Str::Arena(id)))
        })
    }

    /// Push a string that outlives the session without copying it.
    pub fn push_literal(&mut self, s: &'static str) -> RuntimeResult<()> {
        self.push(Value::literal(s))
    }

    pub fn push_list(&mut self, id: ListId) -> RuntimeResult<()> {
        self.push(Value::List(id))
    }

    // Stack access

    pub fn pop(&mut self) -> RuntimeResult<Value> {
        self.guarded("pop", |s| s.stack.pop())
    }

    pub fn peek(&mut self) -> RuntimeResult<Value> {
        self.guarded("peek", |s| s.stack.peek())
    }

    /// Pop the Boolean deciding a conditional branch.
    pub fn pop_condition(&mut self) -> RuntimeResult<bool> {
        self.guarded("condition", |s| {
            let [value] = s.stack.top()?;
            let b = value
                .as_bool()
                .ok_or_else(|| type_mismatch("condition", "a boolean", value.type_name()))?;
            s.stack.replace_top(1, &[])?;
            Ok(b)
        })
    }

    // Stack manipulation

    pub fn dup(&mut self) -> RuntimeResult<()> {
        self.guarded("dup", |s| s.stack.dup())
    }

    pub fn drop_top(&mut self) -> RuntimeResult<()> {
        self.guarded("drop", |s| s.stack.drop_top())
    }

    pub fn swap(&mut self) -> RuntimeResult<()> {
        self.guarded("swap", |s| s.stack.swap())
    }

    pub fn over(&mut self) -> RuntimeResult<()> {
        self.guarded("over", |s| s.stack.over())
    }

    pub fn rot(&mut self) -> RuntimeResult<()> {
        self.guarded("rot", |s| s.stack.rot())
    }

    // Arithmetic, comparison and logic

    fn binary(&mut self, op: BinaryOp) -> RuntimeResult<()> {
        self.guarded(op.symbol(), |s| {
            let [left, right] = s.stack.top()?;
            let result = evaluate_binary(left, right, op, &s.arena)?;
            s.stack.replace_top(2, &[result])
        })
    }

    fn unary(&mut self, op: &'static str, unary: UnaryOp) -> RuntimeResult<()> {
        self.guarded(op, |s| {
            let [value] = s.stack.top()?;
            let result = evaluate_unary(value, unary)?;
            s.stack.replace_top(1, &[result])
        })
    }

    pub fn add(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Add)
    }

    pub fn sub(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Sub)
    }

    pub fn mul(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Mul)
    }

    pub fn div(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Div)
    }

    pub fn modulo(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Mod)
    }

    pub fn neg(&mut self) -> RuntimeResult<()> {
        self.unary("neg", UnaryOp::Neg)
    }

    pub fn lt(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Lt)
    }

    pub fn gt(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Gt)
    }

    pub fn lte(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Lte)
    }

    pub fn gte(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Gte)
    }

    pub fn eq(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Eq)
    }

    /// `eq` followed by `not`, as one operation.
    pub fn neq(&mut self) -> RuntimeResult<()> {
        self.guarded("!=", |s| {
            let [left, right] = s.stack.top()?;
            let equal = evaluate_binary(left, right, BinaryOp::Eq, &s.arena).map_err(|err| match err {
                RuntimeError::TypeMismatch { expected, got, .. } => RuntimeError::TypeMismatch {
                    op: "!=",
                    expected,
                    got,
                },
                other => other,
            })?;
            let result = evaluate_unary(equal, UnaryOp::Not)?;
            s.stack.replace_top(2, &[result])
        })
    }

    pub fn and(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::And)
    }

    pub fn or(&mut self) -> RuntimeResult<()> {
        self.binary(BinaryOp::Or)
    }

    pub fn not(&mut self) -> RuntimeResult<()> {
        self.unary("not", UnaryOp::Not)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(RuntimeConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("stack", &self.stack)
            .field("allocations", &self.arena.allocation_count())
            .field("aborted", &self.aborted)
            .finish_non_exhaustive()
    }
}
