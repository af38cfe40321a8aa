//! Error types shared by the assembler and the VM translator.
//!
//! Every error carries enough context (source line and the offending
//! token) to be reported directly to the user. Nothing here is transient:
//! an error always aborts the file currently being processed.
use std::fmt;

use thiserror::Error;

use crate::translator::ast::Segment;

/// The reason an assembly token was rejected.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseErrorKind {
    /// The token is neither `(label)`, `@address` nor `dest=comp;jump`.
    Shape,
    /// Symbols may not start with a digit or contain characters outside `[A-Za-z0-9_.$:]`.
    SymbolName,
    /// Decimal literal that does not fit in 15 bits.
    AddressRange,
    Dest(String),
    Comp(String),
    Jump(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseErrorKind::Shape        => write!(f, "unrecognized token"),
            ParseErrorKind::SymbolName   => write!(f, "invalid symbol name"),
            ParseErrorKind::AddressRange => write!(f, "address does not fit in 15 bits"),
            ParseErrorKind::Dest(s)      => write!(f, "unknown destination `{}`", s),
            ParseErrorKind::Comp(s)      => write!(f, "unknown computation `{}`", s),
            ParseErrorKind::Jump(s)      => write!(f, "unknown jump `{}`", s),
        }
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AsmError {
    #[error("line {line}: {kind} in `{token}`")]
    Parse {
        line: usize,
        token: String,
        kind: ParseErrorKind,
    },
    /// Raised when a non-literal symbol is looked up before being bound.
    /// The two-pass driver never does this; seeing it is a bug.
    #[error("internal error: symbol `{0}` was looked up before being bound")]
    UnboundSymbol(String),
    #[error("symbol `{0}` resolves to {1}, beyond the 15-bit address space")]
    AddressOverflow(String, usize),
    #[error("literal `{0}` does not fit in 15 bits")]
    LiteralRange(String),
    #[error("no data memory left to allocate variable `{0}`")]
    OutOfVariables(String),
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum VmError {
    #[error("line {line}: unknown command `{verb}`")]
    UnknownVerb { line: usize, verb: String },
    #[error("line {line}: `{verb}` takes {expected} operand(s), found {found}")]
    Arity {
        line: usize,
        verb: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unknown segment `{segment}`")]
    UnknownSegment { line: usize, segment: String },
    #[error("line {line}: `{index}` is not a valid index")]
    InvalidIndex { line: usize, index: String },
    #[error("line {line}: index {index} is out of range for segment `{segment}`")]
    IndexOutOfRange {
        line: usize,
        segment: Segment,
        index: u16,
    },
    #[error("line {line}: cannot pop into the constant segment")]
    PopConstant { line: usize },
    /// Raised by the code writer itself, which does not know source lines.
    #[error("`pop constant {0}` has no destination to write to")]
    PopIntoConstant(u16),
    #[error("generated program no longer fits in instruction memory (address {0})")]
    ProgramTooLarge(usize),
}
