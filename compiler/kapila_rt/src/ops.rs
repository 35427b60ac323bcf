//! Operation vocabulary.
//!
//! [`Op`] is the calling convention between generated code and the
//! runtime: every operation takes no explicit arguments and has a fixed
//! stack effect. [`lookup_word`] maps source words (English, symbolic and
//! Kannada spellings) to operations and boolean literals.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::errors::{RuntimeError, RuntimeResult};
use crate::session::Session;

/// A zero-argument runtime operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    // Comparison
    Lt,
    Gt,
    Eq,
    Neq,
    Lte,
    Gte,
    // Logic
    And,
    Or,
    Not,
    // Stack
    Dup,
    Drop,
    Swap,
    Over,
    Rot,
    // Strings
    StrLen,
    StrConcat,
    StrAt,
    // Lists
    ListNew,
    ListPush,
    ListLen,
    ListAt,
    ListFirst,
    ListRest,
    // I/O
    Print,
    Println,
    ShowStack,
    ReadFile,
    WriteFile,
    // Literals
    True,
    False,
}

impl Op {
    /// Every operation, in declaration order.
    pub const ALL: [Op; 36] = [
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::Neg,
        Op::Lt,
        Op::Gt,
        Op::Eq,
        Op::Neq,
        Op::Lte,
        Op::Gte,
        Op::And,
        Op::Or,
        Op::Not,
        Op::Dup,
        Op::Drop,
        Op::Swap,
        Op::Over,
        Op::Rot,
        Op::StrLen,
        Op::StrConcat,
        Op::StrAt,
        Op::ListNew,
        Op::ListPush,
        Op::ListLen,
        Op::ListAt,
        Op::ListFirst,
        Op::ListRest,
        Op::Print,
        Op::Println,
        Op::ShowStack,
        Op::ReadFile,
        Op::WriteFile,
        Op::True,
        Op::False,
    ];

    /// Canonical source word.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Neg => "neg",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Eq => "=",
            Op::Neq => "!=",
            Op::Lte => "<=",
            Op::Gte => ">=",
            Op::And => "and",
            Op::Or => "or",
            Op::Not => "not",
            Op::Dup => "dup",
            Op::Drop => "drop",
            Op::Swap => "swap",
            Op::Over => "over",
            Op::Rot => "rot",
            Op::StrLen => "str-length",
            Op::StrConcat => ",",
            Op::StrAt => "str-at",
            Op::ListNew => "list",
            Op::ListPush => "append",
            Op::ListLen => "length",
            Op::ListAt => "nth",
            Op::ListFirst => "first",
            Op::ListRest => "rest",
            Op::Print => "print",
            Op::Println => "println",
            Op::ShowStack => ".s",
            Op::ReadFile => "read-file",
            Op::WriteFile => "write-file",
            Op::True => "true",
            Op::False => "false",
        }
    }

    /// Stack effect as `(consumed, produced)`.
    pub const fn arity(self) -> (usize, usize) {
        match self {
            Op::Add
            | Op::Sub
            | Op::Mul
            | Op::Div
            | Op::Mod
            | Op::Lt
            | Op::Gt
            | Op::Eq
            | Op::Neq
            | Op::Lte
            | Op::Gte
            | Op::And
            | Op::Or
            | Op::StrConcat
            | Op::StrAt
            | Op::ListPush
            | Op::ListAt
            | Op::WriteFile => (2, 1),
            Op::Neg
            | Op::Not
            | Op::StrLen
            | Op::ListLen
            | Op::ListFirst
            | Op::ListRest
            | Op::ReadFile => (1, 1),
            Op::Dup => (1, 2),
            Op::Drop | Op::Print | Op::Println => (1, 0),
            Op::Swap => (2, 2),
            Op::Over => (2, 3),
            Op::Rot => (3, 3),
            Op::ListNew | Op::True | Op::False => (0, 1),
            Op::ShowStack => (0, 0),
        }
    }
}

/// What a source word denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Word {
    Op(Op),
    Bool(bool),
}

/// Boolean literal words. These take precedence over operation aliases.
const BOOLEAN_WORDS: &[(&str, bool)] = &[
    ("true", true),
    ("ನಿಜ", true),
    ("ಸರಿ", true),
    ("ಹೌದು", true),
    ("false", false),
    ("ಸುಳ್ಳು", false),
    ("ತಪ್ಪು", false),
    ("ಬೇಸ", false),
    ("ಇಲ್ಲ", false),
];

/// Spellings accepted in addition to each operation's canonical name.
const ALIASES: &[(&str, Op)] = &[
    // Symbolic
    ("≠", Op::Neq),
    ("≤", Op::Lte),
    ("≥", Op::Gte),
    ("mod", Op::Mod),
    ("concat", Op::StrConcat),
    ("read", Op::ReadFile),
    ("write", Op::WriteFile),
    // Arithmetic
    ("ಕೂಡು", Op::Add),
    ("ಕೂಡಿಸು", Op::Add),
    ("ಕಳೆ", Op::Sub),
    ("ಕಳೆಯಿರಿ", Op::Sub),
    ("ಗುಣಿಸು", Op::Mul),
    ("ಗುಣಾಕಾರ", Op::Mul),
    ("ಭಾಗಿಸು", Op::Div),
    ("ಭಾಗಾಕಾರ", Op::Div),
    ("ಶೇಷ", Op::Mod),
    // Comparison
    ("ಸಮ", Op::Eq),
    ("ಸಮನಲ್ಲ", Op::Neq),
    ("ಕಿರಿದು", Op::Lt),
    ("ಹಿರಿದು", Op::Gt),
    ("ಕಿರಿದುಸಮ", Op::Lte),
    ("ಹಿರಿದುಸಮ", Op::Gte),
    // Logic
    ("ಮತ್ತು", Op::And),
    ("ಅಥವಾ", Op::Or),
    ("ಅಲ್ಲ", Op::Not),
    // Stack
    ("ನಕಲು", Op::Dup),
    ("ಬಿಡು", Op::Drop),
    ("ಅದಲುಬದಲು", Op::Swap),
    ("ಮೇಲೆ", Op::Over),
    ("ತಿರುಗಿಸು", Op::Rot),
    // I/O
    ("ಮುದ್ರಿಸು", Op::Print),
    ("ಓದು", Op::ReadFile),
    ("ಬರೆ", Op::WriteFile),
    // Lists
    ("ಉದ್ದ", Op::ListLen),
    ("ತೆಗೆ", Op::ListAt),
    ("ಸೇರಿಸು", Op::ListPush),
    ("ಮೊದಲ", Op::ListFirst),
    ("ಉಳಿದ", Op::ListRest),
    // Strings
    ("ಜೋಡಿಸು", Op::StrConcat),
];

static WORDS: LazyLock<FxHashMap<&'static str, Word>> = LazyLock::new(|| {
    let mut words = FxHashMap::default();
    for op in Op::ALL {
        words.insert(op.name(), Word::Op(op));
    }
    for &(word, op) in ALIASES {
        words.insert(word, Word::Op(op));
    }
    for &(word, b) in BOOLEAN_WORDS {
        words.insert(word, Word::Bool(b));
    }
    words
});

/// Resolve a source word.
pub fn lookup_word(word: &str) -> Option<Word> {
    WORDS.get(word).copied()
}

impl Session {
    /// Execute `op` against the stack.
    ///
    /// The operand count is checked before dispatch, so an operation never
    /// starts on a stack too shallow for it.
    pub fn execute(&mut self, op: Op) -> RuntimeResult<()> {
        if self.is_aborted() {
            return Err(RuntimeError::SessionAborted);
        }
        let (consumed, _) = op.arity();
        let ready = self.stack.require(consumed);
        self.settle(op.name(), ready)?;

        match op {
            Op::Add => self.add(),
            Op::Sub => self.sub(),
            Op::Mul => self.mul(),
            Op::Div => self.div(),
            Op::Mod => self.modulo(),
            Op::Neg => self.neg(),
            Op::Lt => self.lt(),
            Op::Gt => self.gt(),
            Op::Eq => self.eq(),
            Op::Neq => self.neq(),
            Op::Lte => self.lte(),
            Op::Gte => self.gte(),
            Op::And => self.and(),
            Op::Or => self.or(),
            Op::Not => self.not(),
            Op::Dup => self.dup(),
            Op::Drop => self.drop_top(),
            Op::Swap => self.swap(),
            Op::Over => self.over(),
            Op::Rot => self.rot(),
            Op::StrLen => self.str_len(),
            Op::StrConcat => self.str_concat(),
            Op::StrAt => self.str_at(),
            Op::ListNew => self.list_new(),
            Op::ListPush => self.list_push(),
            Op::ListLen => self.list_len(),
            Op::ListAt => self.list_at(),
            Op::ListFirst => self.list_first(),
            Op::ListRest => self.list_rest(),
            Op::Print => self.print(),
            Op::Println => self.println(),
            Op::ShowStack => self.show_stack(),
            Op::ReadFile => self.read_file(),
            Op::WriteFile => self.write_file(),
            Op::True => self.push_bool(true),
            Op::False => self.push_bool(false),
        }
    }

    /// Resolve `word` and execute it. Boolean words push their value.
    pub fn execute_word(&mut self, word: &str) -> RuntimeResult<()> {
        if self.is_aborted() {
            return Err(RuntimeError::SessionAborted);
        }
        match lookup_word(word) {
            Some(Word::Op(op)) => self.execute(op),
            Some(Word::Bool(b)) => self.push_bool(b),
            None => Err(RuntimeError::UnknownWord(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests;
