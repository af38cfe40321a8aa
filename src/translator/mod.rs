//! The Translator module lowers VM bytecode to Hack assembly.
//!
//! A translation unit is parsed in full before any code is written, so a
//! malformed line never yields partial output.

pub mod ast;
pub mod code_writer;
pub mod parser;

use self::code_writer::CodeWriter;
use crate::error::VmError;

/// Translates one VM source file to assembly text.
pub fn translate(source: &str) -> Result<String, VmError> {
    let commands = parser::parse(source)?;

    let mut writer = CodeWriter::new();
    for command in &commands {
        writer.write(command)?;
    }

    debug!("translated {} command(s) into {} instruction(s)", commands.len(), writer.next_address());
    Ok(writer.finish())
}
