//! The Parser module takes a token stream from the lexer and classifies
//! each token into exactly one `Command`.
//!
//! Classification is by shape: `(name)` is a label, `@token` is an
//! address, and everything else must be `[dest=]comp[;jump]` with each part
//! found verbatim in the fixed tables. Nothing is guessed; a token that
//! does not match exactly is an error.
use std::collections::VecDeque;

use regex::Regex;

use super::ast::*;
use super::lexer::Token;
use crate::error::{AsmError, ParseErrorKind};

/// The largest value an address instruction can load.
pub const MAX_ADDRESS: u16 = 0x7FFF;

lazy_static! {
    static ref LABEL: Regex = Regex::new(r"^\((.*)\)$").unwrap();
    static ref ADDRESS: Regex = Regex::new(r"^@(.+)$").unwrap();
    static ref SYMBOL: Regex = Regex::new(r"^[A-Za-z_.$:][A-Za-z0-9_.$:]*$").unwrap();
    static ref LITERAL: Regex = Regex::new(r"^[0-9]+$").unwrap();
    // At most one `=` before the computation and one `;` after it.
    static ref COMPUTE: Regex = Regex::new(r"^(?:([^=;]*)=)?([^=;]*)(?:;([^=;]*))?$").unwrap();
}

pub struct Parser {
    tokens: VecDeque<Token>,
    ast:    Vec<Command>,
}

impl Parser {
    pub fn new<I: IntoIterator<Item = Token>>(tokens: I) -> Self {
        let tokens: VecDeque<Token> = tokens.into_iter().collect();
        let capacity = tokens.len();
        Parser { tokens, ast: Vec::with_capacity(capacity) }
    }

    /// Run the parser, consuming itself and returning the commands in
    /// source order. Stops at the first malformed token.
    pub fn run(mut self) -> Result<Vec<Command>, AsmError> {
        while let Some(command) = self.command()? {
            self.ast.push(command);
        }

        debug!("parsed {} command(s)", self.ast.len());
        Ok(self.ast)
    }

    /// Consumes one token and classifies it.
    fn command(&mut self) -> Result<Option<Command>, AsmError> {
        let token = match self.consume() {
            Some(token) => token,
            // No tokens left to parse means we're out of commands.
            None => return Ok(None),
        };

        classify(&token).map(Some)
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

/// Classifies a single token into a command.
pub fn classify(token: &Token) -> Result<Command, AsmError> {
    let text = token.text.as_str();
    let fail = |kind| AsmError::Parse { line: token.line, token: token.text.clone(), kind };

    if text.starts_with('(') {
        let name = LABEL
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| fail(ParseErrorKind::Shape))?
            .as_str();

        if !SYMBOL.is_match(name) {
            return Err(fail(ParseErrorKind::SymbolName));
        }
        return Ok(Command::Label(name.to_string()));
    }

    if text.starts_with('@') {
        let operand = ADDRESS
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| fail(ParseErrorKind::Shape))?
            .as_str();

        if LITERAL.is_match(operand) {
            match operand.parse::<u16>() {
                Ok(value) if value <= MAX_ADDRESS => {},
                _ => return Err(fail(ParseErrorKind::AddressRange)),
            }
        } else if !SYMBOL.is_match(operand) {
            return Err(fail(ParseErrorKind::SymbolName));
        }
        return Ok(Command::Address(operand.to_string()));
    }

    let caps = COMPUTE.captures(text).ok_or_else(|| fail(ParseErrorKind::Shape))?;

    let dest = match caps.get(1) {
        Some(m) => Dest::from_mnemonic(m.as_str())
            .ok_or_else(|| fail(ParseErrorKind::Dest(m.as_str().to_string())))?,
        None => Dest::Null,
    };

    // Group 2 always participates in a match, possibly empty.
    let comp_text = caps.get(2).map_or("", |m| m.as_str());
    let comp = Comp::from_mnemonic(comp_text)
        .ok_or_else(|| fail(ParseErrorKind::Comp(comp_text.to_string())))?;

    let jump = match caps.get(3) {
        Some(m) => Jump::from_mnemonic(m.as_str())
            .ok_or_else(|| fail(ParseErrorKind::Jump(m.as_str().to_string())))?,
        None => Jump::Null,
    };

    Ok(Command::Compute(dest, comp, jump))
}
