//! Ahead-of-time translation of Brainfuck source into a C program.
//!
//! The translator is a pure renderer over the label resolver's emission
//! sequence: a fixed prologue (tape allocation and zeroing, head init, a
//! wrap-check macro), one statement block per emission event, and a fixed
//! epilogue. All control-flow decisions were already made by
//! [`resolve_labels`]; loop brackets arrive as pre-paired label ids and
//! become goto/label pairs.
//!
//! A small driver wraps the renderer for the CLI: it writes the rendered
//! program to an intermediate `.c` artifact, hands that artifact to an
//! external C compiler, and then applies the artifact retention policy
//! (delete unless asked to keep — whether or not the compiler succeeded).

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::labels::{CompileError, Emit, resolve_labels};
use crate::opcode::Opcode;
use crate::tape::DEFAULT_TAPE_CAPACITY;

/// Default path of the intermediate C artifact, relative to the working
/// directory.
pub const INTERMEDIATE_FILENAME: &str = ".transpiled.c";

/// Flags passed to the external C compiler.
const CC_FLAGS: [&str; 2] = ["-O3", "-Wno-unused-result"];

/// Errors from the translate-and-compile pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The source had unbalanced brackets; nothing was emitted.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The intermediate C artifact could not be written.
    #[error("Failed to write intermediate file '{path}': {source}")]
    Artifact {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The external C compiler could not be invoked at all.
    #[error("Failed to invoke C compiler '{compiler}': {source}")]
    Toolchain {
        compiler: String,
        #[source]
        source: io::Error,
    },

    /// The external C compiler ran but exited non-zero; no binary was
    /// produced.
    #[error("C compiler '{compiler}' exited with {status}")]
    ToolchainFailed {
        compiler: String,
        status: ExitStatus,
    },
}

/// Renders Brainfuck source as a self-contained C program.
#[derive(Debug, Clone)]
pub struct Translator {
    tape_capacity: usize,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            tape_capacity: DEFAULT_TAPE_CAPACITY,
        }
    }

    /// Use a custom tape capacity in the emitted program.
    pub fn with_tape_capacity(tape_capacity: usize) -> Self {
        Self {
            tape_capacity: tape_capacity.max(1),
        }
    }

    /// Translate `source` into C text.
    ///
    /// Returns a [`CompileError`] without emitting anything when the source
    /// has unbalanced brackets.
    pub fn translate(&self, source: &[u8]) -> Result<String, CompileError> {
        let events = resolve_labels(source)?;

        let mut out = String::new();
        self.prologue(&mut out);
        for event in events {
            self.statement(&mut out, event);
        }
        self.epilogue(&mut out);
        Ok(out)
    }

    fn prologue(&self, out: &mut String) {
        let cap = self.tape_capacity;
        let _ = writeln!(out, "#include <stdio.h>");
        let _ = writeln!(out, "#include <stdint.h>");
        let _ = writeln!(out, "#include <stdlib.h>");
        let _ = writeln!(out);
        // Head wraparound is symmetric: one step past either end lands on
        // the opposite end, so head is always in [0, capacity).
        let _ = writeln!(
            out,
            "#define WRAP_CHECK if (head < 0) {{ head = {}; }} else if (head >= {cap}) {{ head = 0; }}",
            cap - 1
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "int main(void) {{");
        let _ = writeln!(out, "\tlong head = 0;");
        let _ = writeln!(out, "\tuint8_t *tape = calloc({cap}, 1);");
        let _ = writeln!(out, "\tif (!tape) return 1;");
    }

    fn statement(&self, out: &mut String, event: Emit) {
        match event {
            Emit::Plain(Opcode::Increment) => {
                let _ = writeln!(out, "\ttape[head]++;");
            }
            Emit::Plain(Opcode::Decrement) => {
                let _ = writeln!(out, "\ttape[head]--;");
            }
            Emit::Plain(Opcode::MoveLeft) => {
                let _ = writeln!(out, "\thead--; WRAP_CHECK;");
            }
            Emit::Plain(Opcode::MoveRight) => {
                let _ = writeln!(out, "\thead++; WRAP_CHECK;");
            }
            Emit::Plain(Opcode::Output) => {
                let _ = writeln!(out, "\tputchar(tape[head]);");
            }
            Emit::Plain(Opcode::Input) => {
                // EOF leaves the cell unmodified.
                let _ = writeln!(
                    out,
                    "\t{{ int c = getchar(); if (c != EOF) tape[head] = (uint8_t)c; }}"
                );
            }
            Emit::Plain(Opcode::LoopOpen) | Emit::Plain(Opcode::LoopClose) => {
                unreachable!("brackets are resolved to LoopOpen/LoopClose events")
            }
            Emit::LoopOpen { id } => {
                let _ = writeln!(out, "\tif (!tape[head]) goto label_close{id};");
                let _ = writeln!(out, "label_open{id}:;");
            }
            Emit::LoopClose { id } => {
                let _ = writeln!(out, "\tif (tape[head]) goto label_open{id};");
                let _ = writeln!(out, "label_close{id}:;");
            }
        }
    }

    fn epilogue(&self, out: &mut String) {
        let _ = writeln!(out, "\tfree(tape);");
        let _ = writeln!(out, "\treturn 0;");
        let _ = writeln!(out, "}}");
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for one translate-and-compile run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Path of the native executable to produce.
    pub output: PathBuf,
    /// Where to write the intermediate C artifact.
    pub intermediate: PathBuf,
    /// Retain the intermediate artifact after the run.
    pub keep_intermediate: bool,
    /// External C compiler to invoke.
    pub compiler: String,
    /// Tape capacity baked into the emitted program.
    pub tape_capacity: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("out"),
            intermediate: PathBuf::from(INTERMEDIATE_FILENAME),
            keep_intermediate: false,
            compiler: String::from("cc"),
            tape_capacity: DEFAULT_TAPE_CAPACITY,
        }
    }
}

/// Translate `source`, write the intermediate artifact, and invoke the
/// external C compiler against it.
///
/// Structural errors are returned before any file is written. The artifact
/// retention policy applies whether or not the compiler succeeds.
pub fn build(source: &[u8], opts: &BuildOptions) -> Result<(), BuildError> {
    let translator = Translator::with_tape_capacity(opts.tape_capacity);
    let program = translator.translate(source)?;

    fs::write(&opts.intermediate, program).map_err(|e| BuildError::Artifact {
        path: opts.intermediate.display().to_string(),
        source: e,
    })?;

    let status = Command::new(&opts.compiler)
        .args(CC_FLAGS)
        .arg("-o")
        .arg(&opts.output)
        .arg(&opts.intermediate)
        .status();

    if !opts.keep_intermediate {
        let _ = fs::remove_file(&opts.intermediate);
    }

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(BuildError::ToolchainFailed {
            compiler: opts.compiler.clone(),
            status,
        }),
        Err(e) => Err(BuildError::Toolchain {
            compiler: opts.compiler.clone(),
            source: e,
        }),
    }
}
