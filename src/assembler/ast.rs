//! This AST describes a parsed Hack assembly file.
//!
//! Execution begins with the first instruction in the file.
//! Comments are prefixed with `//` and are single-line only.
//! Commands are delimited by whitespace.
//!
//! Supported commands:
//!
//! ```text
//! (LOOP)      // Label: binds LOOP to the address of the next instruction
//! @21         // Address: A <= 21
//! @counter    // Address: A <= address of a label or variable
//! D=D+A       // Compute: dest=comp
//! 0;JMP       // Compute: comp;jump
//! AM=M-1;JNE  // Compute: dest=comp;jump
//! ```
//!
//! Compute instructions encode as `111a cccc ccdd djjj`, where `a` selects
//! M over A as the ALU's second operand.

use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Label(String),
    Address(String),
    Compute(Dest, Comp, Jump),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Label(symbol)   => write!(f, "({})", symbol),
            Command::Address(symbol) => write!(f, "@{}", symbol),
            Command::Compute(dest, comp, jump) => {
                if *dest != Dest::Null {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if *jump != Jump::Null {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

impl Command {
    /// Returns true if this command occupies a word of instruction memory.
    pub fn is_instruction(&self) -> bool {
        !matches!(self, Command::Label(_))
    }
}

/// Encodes a compute instruction. Labels and addresses are encoded by the
/// two-pass driver since they need the symbol table.
pub fn encode_compute(dest: Dest, comp: Comp, jump: Jump) -> u16 {
    (0b111 << 13) | (comp.to_u16() << 6) | (dest.to_u16() << 3) | jump.to_u16()
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Dest {
    Null,
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    pub fn from_mnemonic(s: &str) -> Option<Dest> {
        use Dest::*;
        match s {
            "M"   => Some(M),
            "D"   => Some(D),
            "MD"  => Some(MD),
            "A"   => Some(A),
            "AM"  => Some(AM),
            "AD"  => Some(AD),
            "AMD" => Some(AMD),
            _     => None,
        }
    }

    pub fn to_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dest::Null => Ok(()),
            other      => write!(f, "{:?}", other),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Jump {
    Null,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub fn from_mnemonic(s: &str) -> Option<Jump> {
        use Jump::*;
        match s {
            "JGT" => Some(JGT),
            "JEQ" => Some(JEQ),
            "JGE" => Some(JGE),
            "JLT" => Some(JLT),
            "JNE" => Some(JNE),
            "JLE" => Some(JLE),
            "JMP" => Some(JMP),
            _     => None,
        }
    }

    pub fn to_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Jump::Null => Ok(()),
            other      => write!(f, "{:?}", other),
        }
    }
}

/// The ALU computations. Variants ending in `M` read data memory and set
/// the `a` bit of the encoding.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Comp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    M,
    NotD,
    NotA,
    NotM,
    NegD,
    NegA,
    NegM,
    DPlusOne,
    APlusOne,
    MPlusOne,
    DMinusOne,
    AMinusOne,
    MMinusOne,
    DPlusA,
    DPlusM,
    DMinusA,
    DMinusM,
    AMinusD,
    MMinusD,
    DAndA,
    DAndM,
    DOrA,
    DOrM,
}

const COMPUTATIONS: [Comp; 28] = {
    use Comp::*;
    [
        Zero, One, MinusOne, D, A, M, NotD, NotA, NotM, NegD, NegA, NegM,
        DPlusOne, APlusOne, MPlusOne, DMinusOne, AMinusOne, MMinusOne,
        DPlusA, DPlusM, DMinusA, DMinusM, AMinusD, MMinusD,
        DAndA, DAndM, DOrA, DOrM,
    ]
};

impl Comp {
    pub fn from_mnemonic(s: &str) -> Option<Comp> {
        COMPUTATIONS.iter().copied().find(|comp| comp.mnemonic() == s)
    }

    pub fn mnemonic(&self) -> &'static str {
        use Comp::*;
        match self {
            Zero      => "0",
            One       => "1",
            MinusOne  => "-1",
            D         => "D",
            A         => "A",
            M         => "M",
            NotD      => "!D",
            NotA      => "!A",
            NotM      => "!M",
            NegD      => "-D",
            NegA      => "-A",
            NegM      => "-M",
            DPlusOne  => "D+1",
            APlusOne  => "A+1",
            MPlusOne  => "M+1",
            DMinusOne => "D-1",
            AMinusOne => "A-1",
            MMinusOne => "M-1",
            DPlusA    => "D+A",
            DPlusM    => "D+M",
            DMinusA   => "D-A",
            DMinusM   => "D-M",
            AMinusD   => "A-D",
            MMinusD   => "M-D",
            DAndA     => "D&A",
            DAndM     => "D&M",
            DOrA      => "D|A",
            DOrM      => "D|M",
        }
    }

    /// Returns the 7-bit `a cccccc` field of the instruction.
    pub fn to_u16(&self) -> u16 {
        use Comp::*;
        match self {
            Zero      => 0b0_101010,
            One       => 0b0_111111,
            MinusOne  => 0b0_111010,
            D         => 0b0_001100,
            A         => 0b0_110000,
            M         => 0b1_110000,
            NotD      => 0b0_001101,
            NotA      => 0b0_110001,
            NotM      => 0b1_110001,
            NegD      => 0b0_001111,
            NegA      => 0b0_110011,
            NegM      => 0b1_110011,
            DPlusOne  => 0b0_011111,
            APlusOne  => 0b0_110111,
            MPlusOne  => 0b1_110111,
            DMinusOne => 0b0_001110,
            AMinusOne => 0b0_110010,
            MMinusOne => 0b1_110010,
            DPlusA    => 0b0_000010,
            DPlusM    => 0b1_000010,
            DMinusA   => 0b0_010011,
            DMinusM   => 0b1_010011,
            AMinusD   => 0b0_000111,
            MMinusD   => 0b1_000111,
            DAndA     => 0b0_000000,
            DAndM     => 0b1_000000,
            DOrA      => 0b0_010101,
            DOrM      => 0b1_010101,
        }
    }
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
