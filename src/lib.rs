//! A Brainfuck-to-C transpiler and direct interpreter.
//!
//! The same eight-instruction tape machine is executed two ways:
//!
//! - [`translate`] renders the instruction stream as a self-contained C
//!   program and drives an external C compiler to produce a native
//!   executable. Loop brackets are paired ahead of time by the
//!   [`labels`] resolver, which assigns each pair a label id in a single
//!   pass and rejects unbalanced programs before anything is emitted.
//! - [`interpreter`] executes the instruction stream directly, resolving
//!   each loop boundary at run time by scanning for the matching bracket.
//!
//! The two bracket-matching strategies are deliberately independent: the
//! static resolver pays O(N) once, the runtime scanner pays O(body length)
//! every time a boundary is crossed but needs no preprocessing at all.
//! Both share the [`tape`] model: a fixed-capacity circular array of
//! wrapping byte cells.
//!
//! Quick start:
//!
//! ```no_run
//! use braingoo::Interpreter;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Interpreter::new(code.as_bytes().to_vec());
//! bf.run().expect("program should run");
//! ```

pub mod cli_util;
pub mod commands;
pub mod interpreter;
pub mod labels;
pub mod opcode;
pub mod tape;
pub mod translate;

pub use interpreter::{Interpreter, InterpreterError};
pub use labels::{CompileError, Emit, resolve_labels};
pub use opcode::Opcode;
pub use tape::{DEFAULT_TAPE_CAPACITY, Tape};
pub use translate::{BuildError, BuildOptions, Translator};
