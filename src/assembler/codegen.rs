//! Two-pass code generation.
//!
//! The first pass binds every label to the ROM address of the instruction
//! that follows it. The second pass allocates variables, resolves every
//! address operand and encodes one 16-bit word per instruction.
use super::ast::*;
use super::parser::MAX_ADDRESS;
use super::symbol_table::{SymbolTable, SCREEN};
use crate::error::AsmError;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

pub struct Assembler {
    symbols: SymbolTable,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Assembler { symbols: SymbolTable::new() }
    }

    /// Runs both passes, consuming the assembler.
    pub fn run(mut self, commands: &[Command]) -> Result<Vec<u16>, AsmError> {
        self.bind_labels(commands)?;
        self.generate(commands)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Pass 1: bind labels to the address of the next real instruction.
    pub fn bind_labels(&mut self, commands: &[Command]) -> Result<(), AsmError> {
        let mut address: usize = 0;

        for command in commands {
            match command {
                Command::Label(symbol) => {
                    if address > usize::from(MAX_ADDRESS) {
                        return Err(AsmError::AddressOverflow(symbol.clone(), address));
                    }
                    // Checked above, the address fits in 15 bits.
                    let bound = address as u16;
                    if let Some(previous) = self.symbols.add_entry(symbol, bound) {
                        warn!("label `{}` redefined (was {}, now {})", symbol, previous, bound);
                    }
                },
                _ => address += 1,
            }
        }

        debug!("pass 1 bound labels over {} instruction(s)", address);
        Ok(())
    }

    /// Pass 2: allocate variables and encode instructions.
    pub fn generate(&mut self, commands: &[Command]) -> Result<Vec<u16>, AsmError> {
        let mut words = Vec::with_capacity(commands.len());
        let mut next_variable = VARIABLE_BASE;

        for command in commands {
            let word = match command {
                Command::Label(_) => continue,
                Command::Address(symbol) => {
                    if !self.symbols.contains(symbol) {
                        if next_variable >= SCREEN {
                            return Err(AsmError::OutOfVariables(symbol.clone()));
                        }
                        trace!("variable `{}` allocated at {}", symbol, next_variable);
                        self.symbols.add_entry(symbol, next_variable);
                        next_variable += 1;
                    }
                    let address = self.symbols.get_address(symbol)?;
                    if address > MAX_ADDRESS {
                        return Err(AsmError::AddressOverflow(symbol.clone(), usize::from(address)));
                    }
                    address
                },
                Command::Compute(dest, comp, jump) => encode_compute(*dest, *comp, *jump),
            };

            trace!("{:04X}: {} => {:016b}", words.len(), command, word);
            words.push(word);
        }

        debug!(
            "pass 2 emitted {} word(s), {} variable(s)",
            words.len(),
            next_variable - VARIABLE_BASE
        );
        Ok(words)
    }
}

/// Renders words as the `.hack` text format: one 16-character binary
/// line per word.
pub fn to_hack(words: &[u16]) -> String {
    let mut out = String::with_capacity(words.len() * 17);
    for word in words {
        out.push_str(&format!("{:016b}\n", word));
    }
    out
}
