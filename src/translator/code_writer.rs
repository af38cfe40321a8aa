//! Lowers VM commands to Hack assembly.
//!
//! The operand stack lives in RAM and grows upwards from the address held
//! in `SP`, which always points one past the top value. Every command
//! expands to a fixed sequence of instructions. Comparisons branch to
//! absolute addresses computed from the running instruction count, so
//! that count must match exactly what the assembler will place in ROM.
use super::ast::*;
use crate::error::VmError;

/// The largest ROM address an `@` instruction can name.
const MAX_ADDRESS: usize = 0x7FFF;

/// Increments SP and stores D in the new top slot.
const PUSH_D: [&str; 4] = ["@SP", "M=M+1", "A=M-1", "M=D"];

/// Decrements SP and loads the old top value into D.
const POP_D: [&str; 3] = ["@SP", "AM=M-1", "D=M"];

pub struct CodeWriter {
    /// ROM address the next emitted instruction will occupy.
    next_addr: usize,
    lines: Vec<String>,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter { next_addr: 0, lines: Vec::with_capacity(1024) }
    }

    /// ROM address of the next instruction to be emitted.
    pub fn next_address(&self) -> usize {
        self.next_addr
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Appends the annotated instruction sequence for one command.
    pub fn write(&mut self, command: &VmCommand) -> Result<(), VmError> {
        self.comment(&command.to_string());

        match *command {
            VmCommand::Arithmetic(op) => self.arithmetic(op)?,
            VmCommand::Push(segment, index) => self.push(segment, index),
            VmCommand::Pop(segment, index) => self.pop(segment, index)?,
        }

        if self.next_addr > MAX_ADDRESS + 1 {
            return Err(VmError::ProgramTooLarge(self.next_addr));
        }
        Ok(())
    }

    /// Consumes the writer, returning the program text with a trailing newline.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn comment(&mut self, text: &str) {
        self.lines.push(format!("// {}", text));
    }

    /// Emits instructions, advancing the address counter once per line.
    fn emit<S: AsRef<str>>(&mut self, instructions: &[S]) {
        for instruction in instructions {
            self.lines.push(instruction.as_ref().to_string());
            self.next_addr += 1;
        }
    }

    fn arithmetic(&mut self, op: ArithmeticOp) -> Result<(), VmError> {
        use ArithmeticOp::*;
        match op {
            Neg => self.unary("-"),
            Not => self.unary("!"),
            Add => self.binary("M=D+M"),
            Sub => self.binary("M=M-D"),
            And => self.binary("M=D&M"),
            Or  => self.binary("M=D|M"),
            Eq  => self.compare("JEQ")?,
            Gt  => self.compare("JGT")?,
            Lt  => self.compare("JLT")?,
        }
        Ok(())
    }

    /// Applies `op` to the top value in place.
    fn unary(&mut self, op: &str) {
        let apply = format!("M={}M", op);
        self.emit(&["@SP", "A=M-1", apply.as_str()]);
    }

    /// Pops y into D, then overwrites x with `x op y`.
    fn binary(&mut self, combine: &str) {
        self.emit(&POP_D);
        self.emit(&["A=A-1", combine]);
    }

    /// Replaces x and y with -1 if `x - y` satisfies `jump`, else 0.
    fn compare(&mut self, jump: &str) -> Result<(), VmError> {
        self.emit(&POP_D);
        self.emit(&["A=A-1", "D=M-D"]);

        // Layout from here, relative to `base`:
        //   +0 @TRUE  +1 D;jump  +2 D=0  +3 @DONE  +4 0;JMP
        //   +5 D=-1 (TRUE)  +6 @SP (DONE)  +7 A=M-1  +8 M=D
        let base = self.next_addr;
        let is_true = base + 5;
        let done = base + 6;
        if done > MAX_ADDRESS {
            return Err(VmError::ProgramTooLarge(done));
        }

        self.emit(&[
            format!("@{}", is_true),
            format!("D;{}", jump),
            "D=0".to_string(),
            format!("@{}", done),
            "0;JMP".to_string(),
            "D=-1".to_string(),
        ]);
        debug_assert_eq!(self.next_addr, done);
        self.emit(&["@SP", "A=M-1", "M=D"]);
        Ok(())
    }

    fn push(&mut self, segment: Segment, index: u16) {
        use Segment::*;
        match segment {
            Constant => self.emit(&[format!("@{}", index), "D=A".to_string()]),
            Local | Argument | This | That => self.emit(&[
                format!("@{}", index),
                "D=A".to_string(),
                format!("@{}", base_register(segment)),
                "A=D+M".to_string(),
                "D=M".to_string(),
            ]),
            Temp | Pointer | Static => {
                self.emit(&[direct_address(segment, index), "D=M".to_string()])
            },
        }
        self.emit(&PUSH_D);
    }

    fn pop(&mut self, segment: Segment, index: u16) -> Result<(), VmError> {
        use Segment::*;
        match segment {
            Local | Argument | This | That => {
                // Stage the value in R13 and the target address in R14;
                // both need A, so neither may be computed while the other
                // is still live in a register.
                self.emit(&POP_D);
                self.emit(&["@R13", "M=D"]);
                self.emit(&[
                    format!("@{}", index),
                    "D=A".to_string(),
                    format!("@{}", base_register(segment)),
                    "D=D+M".to_string(),
                ]);
                self.emit(&["@R14", "M=D", "@R13", "D=M", "@R14", "A=M", "M=D"]);
            },
            Temp | Pointer | Static => {
                self.emit(&POP_D);
                self.emit(&[direct_address(segment, index), "M=D".to_string()]);
            },
            Constant => return Err(VmError::PopIntoConstant(index)),
        }
        Ok(())
    }
}

fn base_register(segment: Segment) -> &'static str {
    match segment {
        Segment::Local    => "LCL",
        Segment::Argument => "ARG",
        Segment::This     => "THIS",
        _                 => "THAT",
    }
}

fn direct_address(segment: Segment, index: u16) -> String {
    match segment {
        Segment::Temp    => format!("@{}", TEMP_BASE + index),
        Segment::Pointer => (if index == 0 { "@THIS" } else { "@THAT" }).to_string(),
        _                => format!("@{}", STATIC_BASE + index),
    }
}
