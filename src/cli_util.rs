//! CLI-side error rendering: concise messages with a caret pointing at the
//! failing byte in the source stream.

use std::io::{self, Write};

use crate::interpreter::InterpreterError;
use crate::labels::CompileError;
use crate::translate::BuildError;

/// Pretty-print a runtime fault from the direct-execution backend.
/// If `program` is `Some("braingoo")`, messages are prefixed for CLI use.
pub fn print_interpreter_error(program: Option<&str>, source: &[u8], err: &InterpreterError) {
    let msg = match err {
        InterpreterError::UnmatchedBracket { instruction, .. } => {
            format!("Runtime error: unmatched bracket '{instruction}'")
        }
        InterpreterError::Io { source, .. } => format!("I/O error: {source}"),
    };
    let offset = match err {
        InterpreterError::UnmatchedBracket { offset, .. } => *offset,
        InterpreterError::Io { offset, .. } => *offset,
    };
    print_error_with_context(&prefix(program, &msg), source, offset);
}

/// Pretty-print a failure from the translation backend.
pub fn print_build_error(program: Option<&str>, source: &[u8], err: &BuildError) {
    match err {
        BuildError::Compile(compile_err) => {
            let (msg, offset) = match compile_err {
                CompileError::UnmatchedOpen { offset } => {
                    ("Compile error: unmatched bracket '['".to_string(), *offset)
                }
                CompileError::UnmatchedClose { offset } => {
                    ("Compile error: unmatched bracket ']'".to_string(), *offset)
                }
            };
            print_error_with_context(&prefix(program, &msg), source, offset);
        }
        other => {
            eprintln!("{}", prefix(program, &format!("Build error: {other}")));
            let _ = io::stderr().flush();
        }
    }
}

fn prefix(program: Option<&str>, msg: &str) -> String {
    if let Some(p) = program {
        format!("{p}: {msg}")
    } else {
        msg.to_string()
    }
}

/// Print a concise error with the zero-based byte offset and a caret context
/// window around it. Non-ASCII source bytes are shown lossily.
pub fn print_error_with_context(msg: &str, source: &[u8], offset: usize) {
    eprintln!("{msg} at byte offset {offset}");

    // Show a short window around the position for context
    const WINDOW_BYTES: usize = 32;

    let start = offset.saturating_sub(WINDOW_BYTES);
    let end = (offset + WINDOW_BYTES + 1).min(source.len());
    let slice = String::from_utf8_lossy(&source[start..end]);
    // Control bytes would break the caret alignment
    let display: String = slice
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    eprintln!("  {display}");

    let mut underline = String::new();
    for _ in 0..offset.saturating_sub(start) {
        underline.push(' ');
    }
    underline.push('^');
    eprintln!("  {underline}");
    let _ = io::stderr().flush();
}
