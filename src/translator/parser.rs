//! Parses VM source into commands, one per non-empty line.
use super::ast::*;
use crate::error::VmError;

/// Parses a whole translation unit, stopping at the first bad line.
pub fn parse(source: &str) -> Result<Vec<VmCommand>, VmError> {
    let mut commands = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let code = match line.find("//") {
            Some(start) => &line[..start],
            None => line,
        };

        let words: Vec<&str> = code.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        commands.push(parse_command(&words, index + 1)?);
    }

    debug!("parsed {} VM command(s)", commands.len());
    Ok(commands)
}

/// Classifies one line's worth of words. `words` must not be empty.
pub fn parse_command(words: &[&str], line: usize) -> Result<VmCommand, VmError> {
    let (verb, operands) = match words.split_first() {
        Some(split) => split,
        None => return Err(VmError::UnknownVerb { line, verb: String::new() }),
    };

    let arity = |expected: usize| {
        if operands.len() == expected {
            Ok(())
        } else {
            Err(VmError::Arity {
                line,
                verb: verb.to_string(),
                expected,
                found: operands.len(),
            })
        }
    };

    match *verb {
        "push" | "pop" => {
            arity(2)?;
            let segment = Segment::from_name(operands[0]).ok_or_else(|| VmError::UnknownSegment {
                line,
                segment: operands[0].to_string(),
            })?;
            let index = parse_index(segment, operands[1], line)?;

            if *verb == "push" {
                Ok(VmCommand::Push(segment, index))
            } else if segment == Segment::Constant {
                Err(VmError::PopConstant { line })
            } else {
                Ok(VmCommand::Pop(segment, index))
            }
        },
        other => {
            let op = ArithmeticOp::from_mnemonic(other).ok_or_else(|| VmError::UnknownVerb {
                line,
                verb: other.to_string(),
            })?;
            arity(0)?;
            Ok(VmCommand::Arithmetic(op))
        },
    }
}

fn parse_index(segment: Segment, text: &str, line: usize) -> Result<u16, VmError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VmError::InvalidIndex { line, index: text.to_string() });
    }

    let index = text
        .parse::<u16>()
        .map_err(|_| VmError::InvalidIndex { line, index: text.to_string() })?;
    if index > segment.max_index() {
        return Err(VmError::IndexOutOfRange { line, segment, index });
    }
    Ok(index)
}
