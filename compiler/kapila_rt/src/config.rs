//! Session configuration.
//!
//! Limits and presentation choices for one runtime session. All fields have
//! defaults matching the behaviour generated programs expect; embedders can
//! override them with the `with_*` builders or from the environment.

use tracing::warn;

/// Default evaluation stack depth.
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

/// Default number of arena allocations a session may make.
pub const DEFAULT_ALLOCATION_LIMIT: usize = 1 << 20;

/// Behaviour of list indexing outside `[0, len)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Fail with `IndexOutOfRange`.
    #[default]
    Strict,
    /// Yield integer `0` in place of the missing item.
    Sentinel,
}

impl IndexPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "sentinel" => Some(Self::Sentinel),
            _ => None,
        }
    }
}

/// The two words `print` uses for booleans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolLiterals {
    pub true_word: String,
    pub false_word: String,
}

impl BoolLiterals {
    pub fn new(true_word: impl Into<String>, false_word: impl Into<String>) -> Self {
        BoolLiterals {
            true_word: true_word.into(),
            false_word: false_word.into(),
        }
    }

    #[inline]
    pub fn word(&self, b: bool) -> &str {
        if b {
            &self.true_word
        } else {
            &self.false_word
        }
    }
}

impl Default for BoolLiterals {
    /// `ಸರಿ` (correct) and `ತಪ್ಪು` (wrong).
    fn default() -> Self {
        BoolLiterals::new("ಸರಿ", "ತಪ್ಪು")
    }
}

/// Runtime configuration for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum evaluation stack depth.
    pub stack_capacity: usize,
    /// Maximum number of live arena allocations per session.
    pub allocation_limit: usize,
    pub index_policy: IndexPolicy,
    pub bool_literals: BoolLiterals,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            stack_capacity: DEFAULT_STACK_CAPACITY,
            allocation_limit: DEFAULT_ALLOCATION_LIMIT,
            index_policy: IndexPolicy::default(),
            bool_literals: BoolLiterals::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `KAPILA_STACK_CAPACITY`,
    /// `KAPILA_ALLOCATION_LIMIT` and `KAPILA_INDEX_POLICY` when set.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("KAPILA_STACK_CAPACITY") {
            match raw.trim().parse() {
                Ok(n) => config.stack_capacity = n,
                Err(e) => warn!(value = %raw, "ignoring KAPILA_STACK_CAPACITY: {e}"),
            }
        }
        if let Some(raw) = lookup("KAPILA_ALLOCATION_LIMIT") {
            match raw.trim().parse() {
                Ok(n) => config.allocation_limit = n,
                Err(e) => warn!(value = %raw, "ignoring KAPILA_ALLOCATION_LIMIT: {e}"),
            }
        }
        if let Some(raw) = lookup("KAPILA_INDEX_POLICY") {
            match IndexPolicy::parse(&raw) {
                Some(policy) => config.index_policy = policy,
                None => warn!(value = %raw, "ignoring KAPILA_INDEX_POLICY: expected `strict` or `sentinel`"),
            }
        }

        config
    }

    #[must_use]
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_allocation_limit(mut self, limit: usize) -> Self {
        self.allocation_limit = limit;
        self
    }

    #[must_use]
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    #[must_use]
    pub fn with_bool_literals(mut self, literals: BoolLiterals) -> Self {
        self.bool_literals = literals;
        self
    }
}
