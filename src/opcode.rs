//! Classification of raw source bytes into Brainfuck opcodes.
//!
//! Only eight byte values carry meaning; every other byte is a comment and is
//! skipped by both backends without touching the tape or control flow.

use std::fmt;

/// One of the eight recognized Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `+` — increment the cell under the head, wrapping modulo 256.
    Increment,
    /// `-` — decrement the cell under the head, wrapping modulo 256.
    Decrement,
    /// `<` — move the head one cell left, wrapping to the last cell from 0.
    MoveLeft,
    /// `>` — move the head one cell right, wrapping to 0 from the last cell.
    MoveRight,
    /// `.` — write the cell under the head to stdout as a single byte.
    Output,
    /// `,` — read a single byte from stdin into the cell under the head.
    Input,
    /// `[` — jump past the matching `]` when the cell under the head is zero.
    LoopOpen,
    /// `]` — jump back after the matching `[` when the cell is non-zero.
    LoopClose,
}

impl Opcode {
    /// Classify a raw source byte. Returns `None` for comment bytes.
    pub fn classify(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Opcode::Increment),
            b'-' => Some(Opcode::Decrement),
            b'<' => Some(Opcode::MoveLeft),
            b'>' => Some(Opcode::MoveRight),
            b'.' => Some(Opcode::Output),
            b',' => Some(Opcode::Input),
            b'[' => Some(Opcode::LoopOpen),
            b']' => Some(Opcode::LoopClose),
            _ => None,
        }
    }

    /// The source character for this opcode.
    pub fn as_char(self) -> char {
        match self {
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::MoveLeft => '<',
            Opcode::MoveRight => '>',
            Opcode::Output => '.',
            Opcode::Input => ',',
            Opcode::LoopOpen => '[',
            Opcode::LoopClose => ']',
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
