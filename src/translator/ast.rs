//! Commands of the stack-based VM language.
//!
//! ```text
//! push constant 7   // push the literal 7
//! push local 2      // push RAM[LCL + 2]
//! pop temp 0        // RAM[5] <= pop
//! add               // pop y, pop x, push x + y
//! eq                // pop y, pop x, push -1 if x == y else 0
//! ```
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VmCommand {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
}

impl fmt::Display for VmCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VmCommand::Arithmetic(op)     => write!(f, "{}", op),
            VmCommand::Push(segment, idx) => write!(f, "push {} {}", segment, idx),
            VmCommand::Pop(segment, idx)  => write!(f, "pop {} {}", segment, idx),
        }
    }
}

impl VmCommand {
    /// Net change in stack depth caused by executing this command.
    pub fn stack_effect(&self) -> i32 {
        match self {
            VmCommand::Arithmetic(op) if op.is_unary() => 0,
            VmCommand::Arithmetic(_) => -1,
            VmCommand::Push(_, _) => 1,
            VmCommand::Pop(_, _) => -1,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub fn from_mnemonic(s: &str) -> Option<ArithmeticOp> {
        use ArithmeticOp::*;
        match s {
            "add" => Some(Add),
            "sub" => Some(Sub),
            "neg" => Some(Neg),
            "eq"  => Some(Eq),
            "gt"  => Some(Gt),
            "lt"  => Some(Lt),
            "and" => Some(And),
            "or"  => Some(Or),
            "not" => Some(Not),
            _     => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        use ArithmeticOp::*;
        match self {
            Add => "add",
            Sub => "sub",
            Neg => "neg",
            Eq  => "eq",
            Gt  => "gt",
            Lt  => "lt",
            And => "and",
            Or  => "or",
            Not => "not",
        }
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, ArithmeticOp::Neg | ArithmeticOp::Not)
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

/// RAM address of the first temp register.
pub const TEMP_BASE: u16 = 5;
/// RAM address of the first static variable.
pub const STATIC_BASE: u16 = 16;

impl Segment {
    pub fn from_name(s: &str) -> Option<Segment> {
        use Segment::*;
        match s {
            "constant" => Some(Constant),
            "local"    => Some(Local),
            "argument" => Some(Argument),
            "this"     => Some(This),
            "that"     => Some(That),
            "temp"     => Some(Temp),
            "pointer"  => Some(Pointer),
            "static"   => Some(Static),
            _          => None,
        }
    }

    pub fn name(&self) -> &'static str {
        use Segment::*;
        match self {
            Constant => "constant",
            Local    => "local",
            Argument => "argument",
            This     => "this",
            That     => "that",
            Temp     => "temp",
            Pointer  => "pointer",
            Static   => "static",
        }
    }

    /// The largest index that addresses a valid slot in this segment.
    pub fn max_index(&self) -> u16 {
        use Segment::*;
        match self {
            Temp    => 7,
            Pointer => 1,
            Static  => 255 - STATIC_BASE,
            _       => 0x7FFF,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(VmCommand::Push(Segment::Constant, 7).to_string(), "push constant 7");
        assert_eq!(VmCommand::Pop(Segment::Pointer, 1).to_string(), "pop pointer 1");
        assert_eq!(VmCommand::Arithmetic(ArithmeticOp::Lt).to_string(), "lt");
    }

    #[test]
    fn test_stack_effect() {
        assert_eq!(VmCommand::Arithmetic(ArithmeticOp::Neg).stack_effect(), 0);
        assert_eq!(VmCommand::Arithmetic(ArithmeticOp::Not).stack_effect(), 0);
        assert_eq!(VmCommand::Arithmetic(ArithmeticOp::Eq).stack_effect(), -1);
        assert_eq!(VmCommand::Push(Segment::Local, 0).stack_effect(), 1);
        assert_eq!(VmCommand::Pop(Segment::Local, 0).stack_effect(), -1);
    }

    #[test]
    fn test_names_round_trip() {
        for name in &["constant", "local", "argument", "this", "that", "temp", "pointer", "static"] {
            assert_eq!(Segment::from_name(name).map(|s| s.name()), Some(*name));
        }
        assert_eq!(Segment::from_name("Local"), None);
        assert_eq!(ArithmeticOp::from_mnemonic("ADD"), None);
    }
}
