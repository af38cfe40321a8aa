//! A back end for the Hack platform: a VM translator that lowers stack
//! bytecode to assembly, and an assembler that lowers assembly to 16-bit
//! machine words.

#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;

pub mod assembler;
pub mod error;
pub mod translator;

pub use error::{AsmError, ParseErrorKind, VmError};
