use std::collections::HashMap;

use super::parser::MAX_ADDRESS;
use crate::error::AsmError;

/// Base of the memory-mapped screen.
pub const SCREEN: u16 = 0x4000;
/// Memory-mapped keyboard register.
pub const KBD: u16 = 0x6000;

const PREDEFINED: [(&str, u16); 23] = [
    ("SP",   0),
    ("LCL",  1),
    ("ARG",  2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0",   0),
    ("R1",   1),
    ("R2",   2),
    ("R3",   3),
    ("R4",   4),
    ("R5",   5),
    ("R6",   6),
    ("R7",   7),
    ("R8",   8),
    ("R9",   9),
    ("R10",  10),
    ("R11",  11),
    ("R12",  12),
    ("R13",  13),
    ("R14",  14),
    ("R15",  15),
    ("SCREEN", SCREEN),
    ("KBD",    KBD),
];

/// Maps symbols to addresses for a single assembly run.
///
/// Each table starts from its own copy of the predefined symbols, so
/// bindings made while assembling one file never leak into another.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let symbols = PREDEFINED
            .iter()
            .map(|(symbol, address)| (symbol.to_string(), *address))
            .collect();
        SymbolTable { symbols }
    }

    /// Binds `symbol` to `address`, replacing any previous binding.
    /// Returns the previous address, if there was one.
    pub fn add_entry(&mut self, symbol: &str, address: u16) -> Option<u16> {
        self.symbols.insert(symbol.to_string(), address)
    }

    /// True if `symbol` is a decimal literal or is already bound.
    pub fn contains(&self, symbol: &str) -> bool {
        is_literal(symbol) || self.symbols.contains_key(symbol)
    }

    /// Resolves a literal or a bound symbol.
    ///
    /// Looking up an unbound name is an error rather than a default: the
    /// two-pass driver binds every symbol before it asks for it.
    pub fn get_address(&self, symbol: &str) -> Result<u16, AsmError> {
        if is_literal(symbol) {
            return match symbol.parse::<u16>() {
                Ok(address) if address <= MAX_ADDRESS => Ok(address),
                _ => Err(AsmError::LiteralRange(symbol.to_string())),
            };
        }

        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| AsmError::UnboundSymbol(symbol.to_string()))
    }
}

/// A literal is a non-empty run of decimal digits.
pub fn is_literal(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.bytes().all(|b| b.is_ascii_digit())
}
