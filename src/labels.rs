//! Static label resolution for the translation backend.
//!
//! A single forward pass over the instruction bytes pairs every `[` with its
//! `]` and assigns the pair a unique label id. The output is an ordered
//! sequence of emission events the C renderer consumes verbatim: plain
//! instructions pass through, loop brackets become conditional-jump/label
//! pairs. Unbalanced brackets are reported here, before anything is emitted.

use crate::opcode::Opcode;

/// Errors found while pairing loop brackets ahead of translation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A `[` was still open when the instruction stream ended.
    #[error("Unmatched '[' at byte offset {offset}")]
    UnmatchedOpen { offset: usize },

    /// A `]` appeared with no `[` open.
    #[error("Unmatched ']' at byte offset {offset}")]
    UnmatchedClose { offset: usize },
}

/// One unit of output for the translation backend.
///
/// `LoopOpen` stands for a conditional forward jump (taken when the current
/// cell is zero) to the pair's after-loop label, followed by the body-entry
/// label. `LoopClose` stands for a conditional backward jump (taken when the
/// cell is non-zero) to the body-entry label, followed by the after-loop
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// A non-bracket instruction, translated one-to-one.
    Plain(Opcode),
    /// Open of bracket pair `id`: forward jump on zero plus body-entry label.
    LoopOpen { id: usize },
    /// Close of bracket pair `id`: backward jump on non-zero plus after-loop label.
    LoopClose { id: usize },
}

/// Resolve every bracket pair in `source` to a label id.
///
/// Comment bytes are dropped; they produce no event. Ids are allocated in
/// `[`-order starting at 0, and each `]` closes the innermost still-open
/// `[` — the pending ids form a stack because loop bodies nest like
/// parentheses.
pub fn resolve_labels(source: &[u8]) -> Result<Vec<Emit>, CompileError> {
    let mut events = Vec::new();
    let mut pending: Vec<usize> = Vec::new();
    let mut open_offsets: Vec<usize> = Vec::new();
    let mut next_id = 0usize;

    for (offset, &byte) in source.iter().enumerate() {
        let Some(op) = Opcode::classify(byte) else {
            continue;
        };
        match op {
            Opcode::LoopOpen => {
                events.push(Emit::LoopOpen { id: next_id });
                pending.push(next_id);
                open_offsets.push(offset);
                next_id += 1;
            }
            Opcode::LoopClose => {
                let Some(id) = pending.pop() else {
                    return Err(CompileError::UnmatchedClose { offset });
                };
                open_offsets.pop();
                events.push(Emit::LoopClose { id });
            }
            other => events.push(Emit::Plain(other)),
        }
    }

    // Anything still pending never saw its ']'; blame the deepest one.
    if !pending.is_empty() {
        let offset = open_offsets.pop().unwrap_or(0);
        return Err(CompileError::UnmatchedOpen { offset });
    }

    Ok(events)
}
