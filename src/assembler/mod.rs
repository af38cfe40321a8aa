//! The Assembler module is in charge of taking a Hack
//! assembly file and producing 16-bit machine words.
//!
//! It does this by splitting the source into whitespace-delimited
//! tokens, classifying each token into a `Command`, and running a
//! two-pass driver over the commands: labels first, then variables and
//! encoding.

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod symbol_table;

pub use codegen::to_hack;

use crate::error::AsmError;

/// Parses assembly source into commands.
pub fn parse(source: &str) -> Result<Vec<ast::Command>, AsmError> {
    parser::Parser::new(lexer::tokenize(source)).run()
}

/// Assembles source text into machine words, one per instruction.
pub fn assemble(source: &str) -> Result<Vec<u16>, AsmError> {
    let commands = parse(source)?;
    codegen::Assembler::new().run(&commands)
}
