//! Direct execution of Brainfuck source, no precompilation step.
//!
//! The interpreter walks the instruction bytes with an explicit instruction
//! pointer and mutates a [`Tape`] in place. Loop boundaries are resolved at
//! run time by scanning the stream for the matching bracket; nothing is
//! precomputed and nothing is cached between loop iterations — the scan is
//! repeated every time a boundary is crossed. That trades throughput on hot
//! loops for a backend with zero setup cost.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0 (default 30,000 cells), circular in both
//!   directions.
//! - Input `,` reads a single byte from stdin; at EOF the cell is left
//!   unmodified.
//! - Output `.` writes the byte at the current cell to stdout.
//! - Non-instruction bytes are comments and are skipped.
//! - A bracket whose partner cannot be found at run time is a fatal fault
//!   reported with the bracket's character and byte offset.
//!
//! Quick start:
//!
//! ```no_run
//! use braingoo::Interpreter;
//!
//! let mut bf = Interpreter::new(b"++++++++[>++++++++<-]>.".to_vec());
//! bf.run().expect("program should run");
//! ```

use crate::opcode::Opcode;
use crate::tape::Tape;

/// Fatal faults raised while directly executing a program.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A run-time bracket scan hit a stream boundary without finding the
    /// partner bracket. Carries the bracket that triggered the scan.
    #[error("Unmatched '{instruction}' at byte offset {offset}")]
    UnmatchedBracket { offset: usize, instruction: char },

    /// An underlying I/O error occurred while reading from stdin.
    #[error("I/O error at byte offset {offset}: {source}")]
    Io {
        offset: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Find the `]` matching the `[` at `from`, at run time.
///
/// Steps forward one byte at a time, counting further `[` as `opened` and
/// `]` as `closed`; the first `]` seen while `opened == closed` is the
/// partner, and the returned position is the byte *after* it. `None` means
/// the stream ended first.
pub fn scan_forward(source: &[u8], from: usize) -> Option<usize> {
    let mut opened = 0usize;
    let mut closed = 0usize;
    let mut pos = from;

    while pos + 1 < source.len() {
        pos += 1;
        match Opcode::classify(source[pos]) {
            Some(Opcode::LoopClose) => {
                if opened == closed {
                    return Some(pos + 1);
                }
                closed += 1;
            }
            Some(Opcode::LoopOpen) => opened += 1,
            _ => {}
        }
    }
    None
}

/// Find the `[` matching the `]` at `from`, at run time.
///
/// Mirror image of [`scan_forward`]: steps backward counting `]` as `closed`
/// and `[` as `opened`; the first `[` seen while `opened == closed` is the
/// partner. The returned position is the byte *after* that `[`, so the loop
/// body re-executes without re-evaluating the bracket. `None` means the
/// start of the stream was reached first.
pub fn scan_backward(source: &[u8], from: usize) -> Option<usize> {
    let mut opened = 0usize;
    let mut closed = 0usize;
    let mut pos = from;

    while pos > 0 {
        pos -= 1;
        match Opcode::classify(source[pos]) {
            Some(Opcode::LoopOpen) => {
                if opened == closed {
                    return Some(pos + 1);
                }
                opened += 1;
            }
            Some(Opcode::LoopClose) => closed += 1,
            _ => {}
        }
    }
    None
}

/// A direct-execution Brainfuck machine.
///
/// Owns the instruction bytes and a fresh [`Tape`]; each `Interpreter` value
/// is one run's worth of state, so independent programs never share a tape.
pub struct Interpreter {
    source: Vec<u8>,
    tape: Tape,
    // Optional hooks so '.' and ',' are testable without real stdio.
    output_sink: Option<Box<dyn FnMut(u8) + Send>>,
    input_provider: Option<Box<dyn FnMut() -> Option<u8> + Send>>,
}

impl Interpreter {
    /// Create an interpreter over raw source bytes with a default tape.
    pub fn new(source: Vec<u8>) -> Self {
        Self {
            source,
            tape: Tape::new(),
            output_sink: None,
            input_provider: None,
        }
    }

    /// Create an interpreter with a custom tape capacity.
    pub fn with_tape_capacity(source: Vec<u8>, capacity: usize) -> Self {
        Self {
            source,
            tape: Tape::with_capacity(capacity),
            output_sink: None,
            input_provider: None,
        }
    }

    /// Send `.` output to `sink` instead of stdout, one byte per call.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Read `,` input from `provider` instead of stdin. Returning `None`
    /// signals EOF and leaves the current cell unmodified.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> Option<u8> + Send + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    /// The byte under the tape head, for inspection after a run.
    pub fn current_cell(&self) -> u8 {
        self.tape.read()
    }

    /// Execute the program until the instruction pointer reaches the end of
    /// the stream.
    ///
    /// Returns `Ok(())` on a normal halt or an [`InterpreterError`] carrying
    /// the crash context on a fatal fault. An empty program is a normal halt
    /// that produces no output.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        self.execute(false)
    }

    /// Debug-run the program, printing a step-by-step table of operations
    /// instead of producing I/O side effects. The tape and head advance
    /// exactly as in a real run, but:
    /// - `.` logs the byte instead of writing it
    /// - `,` does not read; it simulates EOF and leaves the cell unmodified
    pub fn run_debug(&mut self) -> Result<(), InterpreterError> {
        self.execute(true)
    }

    /// Internal executor shared by run and run_debug.
    fn execute(&mut self, debug: bool) -> Result<(), InterpreterError> {
        let mut ip = 0usize;
        let mut step = 0usize;

        if debug {
            println!("STEP | IP  | PTR | CELL | INSTR | ACTION");
            println!("-----+-----+-----+------+-------+----------------------------------------");
        }

        // Halt exactly when the pointer reaches the stream length; the
        // pointer never probes past the last instruction.
        while ip < self.source.len() {
            let byte = self.source[ip];
            let Some(op) = Opcode::classify(byte) else {
                ip += 1;
                continue;
            };

            let (ptr_before, cell_before) = (self.tape.head(), self.tape.read());
            let mut action: Option<String> = if debug { Some(String::new()) } else { None };

            match op {
                Opcode::Increment => {
                    self.tape.increment();
                    if let Some(a) = action.as_mut() {
                        *a = format!(
                            "Increment cell[{}] from {} to {}",
                            ptr_before,
                            cell_before,
                            self.tape.read()
                        );
                    }
                    ip += 1;
                }
                Opcode::Decrement => {
                    self.tape.decrement();
                    if let Some(a) = action.as_mut() {
                        *a = format!(
                            "Decrement cell[{}] from {} to {}",
                            ptr_before,
                            cell_before,
                            self.tape.read()
                        );
                    }
                    ip += 1;
                }
                Opcode::MoveLeft => {
                    self.tape.move_left();
                    if let Some(a) = action.as_mut() {
                        *a = format!("Moved head to index {}", self.tape.head());
                    }
                    ip += 1;
                }
                Opcode::MoveRight => {
                    self.tape.move_right();
                    if let Some(a) = action.as_mut() {
                        *a = format!("Moved head to index {}", self.tape.head());
                    }
                    ip += 1;
                }
                Opcode::Output => {
                    if debug {
                        if let Some(a) = action.as_mut() {
                            *a = format!("Output byte {} (suppressed in debug)", self.tape.read());
                        }
                    } else if let Some(sink) = self.output_sink.as_mut() {
                        (sink)(self.tape.read());
                    } else {
                        use std::io::Write;
                        let buf = [self.tape.read()];
                        if let Err(e) = std::io::stdout().write_all(&buf) {
                            return Err(InterpreterError::Io { offset: ip, source: e });
                        }
                    }
                    ip += 1;
                }
                Opcode::Input => {
                    if debug {
                        if let Some(a) = action.as_mut() {
                            *a = "Read byte from stdin -> simulated EOF (cell unchanged)"
                                .to_string();
                        }
                    } else if let Some(provider) = self.input_provider.as_mut() {
                        if let Some(b) = (provider)() {
                            self.tape.write(b);
                        }
                        // None is EOF: the cell keeps its value.
                    } else {
                        // Read exactly one byte from stdin into the current
                        // cell; at EOF the cell is left unmodified.
                        use std::io::Read;
                        let mut buf = [0u8; 1];
                        match std::io::stdin().read(&mut buf) {
                            Ok(0) => {}
                            Ok(_) => self.tape.write(buf[0]),
                            Err(e) => {
                                return Err(InterpreterError::Io { offset: ip, source: e });
                            }
                        }
                    }
                    ip += 1;
                }
                Opcode::LoopOpen => {
                    if self.tape.read() == 0 {
                        let Some(target) = scan_forward(&self.source, ip) else {
                            return Err(InterpreterError::UnmatchedBracket {
                                offset: ip,
                                instruction: '[',
                            });
                        };
                        if let Some(a) = action.as_mut() {
                            *a = format!("Cell is 0; jump forward to IP {target}");
                        }
                        ip = target;
                    } else {
                        if let Some(a) = action.as_mut() {
                            *a = "Enter loop (cell != 0)".to_string();
                        }
                        ip += 1;
                    }
                }
                Opcode::LoopClose => {
                    if self.tape.read() != 0 {
                        let Some(target) = scan_backward(&self.source, ip) else {
                            return Err(InterpreterError::UnmatchedBracket {
                                offset: ip,
                                instruction: ']',
                            });
                        };
                        if let Some(a) = action.as_mut() {
                            *a = format!("Cell != 0; jump back to IP {target}");
                        }
                        ip = target;
                    } else {
                        if let Some(a) = action.as_mut() {
                            *a = "Exit loop (cell is 0)".to_string();
                        }
                        ip += 1;
                    }
                }
            }

            if debug {
                println!(
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step,
                    ip,
                    ptr_before,
                    cell_before,
                    op,
                    action.unwrap_or_default()
                );
            }
            step += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::resolve_labels;
    use std::sync::{Arc, Mutex};

    fn run_collecting_output(source: &[u8]) -> (Result<(), InterpreterError>, Vec<u8>) {
        let out = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&out);
        let mut bf = Interpreter::new(source.to_vec());
        bf.set_output_sink(move |b| sink.lock().unwrap().push(b));
        let result = bf.run();
        let bytes = out.lock().unwrap().clone();
        (result, bytes)
    }

    #[test]
    fn empty_program_halts_normally_with_no_output() {
        let (result, output) = run_collecting_output(b"");
        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[test]
    fn comment_only_program_is_a_no_op() {
        let (result, output) = run_collecting_output(b"hello world\n");
        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[test]
    fn multiply_loop_outputs_sixty_four() {
        // 8 * 8 moved into the second cell, then printed.
        let (result, output) = run_collecting_output(b"++++++++[>++++++++<-]>.");
        assert!(result.is_ok());
        assert_eq!(output, vec![64]);
    }

    #[test]
    fn two_level_nested_loops_multiply_through() {
        // 2 outer iterations, each loading 2 into cell 1; the inner loop
        // adds 2 to cell 2 per count, so cell 2 ends at 2 * 2 * 2 = 8.
        let (result, output) = run_collecting_output(b"++[>++[>++<-]<-]>>.");
        assert!(result.is_ok());
        assert_eq!(output, vec![8]);

        let (result, output) = run_collecting_output(b"++[>++++[>++<-]<-]>>.");
        assert!(result.is_ok());
        assert_eq!(output, vec![16]);
    }

    #[test]
    fn loop_over_zero_cell_is_skipped_entirely() {
        // Every byte between the brackets is a comment; the initial cell is
        // zero so the body never runs.
        let (result, output) = run_collecting_output(b"[this is never run]");
        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[test]
    fn lone_open_bracket_faults_with_crash_context() {
        let mut bf = Interpreter::with_tape_capacity(b"[".to_vec(), 10);
        let err = bf.run().unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket {
                offset: 0,
                instruction: '['
            }
        ));
    }

    #[test]
    fn unmatched_close_bracket_faults_when_cell_nonzero() {
        let mut bf = Interpreter::with_tape_capacity(b"+]".to_vec(), 10);
        let err = bf.run().unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket {
                offset: 1,
                instruction: ']'
            }
        ));
    }

    #[test]
    fn trailing_open_bracket_with_nonzero_cell_is_not_a_fault() {
        // '[' on a non-zero cell enters the body without scanning, so the
        // run ends normally at the stream boundary.
        let mut bf = Interpreter::with_tape_capacity(b"+++[".to_vec(), 10);
        assert!(bf.run().is_ok());
        assert_eq!(bf.current_cell(), 3);
    }

    #[test]
    fn unmatched_close_on_zero_cell_is_not_a_fault() {
        // ']' with a zero cell just falls through; no scan runs.
        let mut bf = Interpreter::with_tape_capacity(b"]".to_vec(), 10);
        assert!(bf.run().is_ok());
    }

    #[test]
    fn head_wraps_around_the_tape_in_both_directions() {
        let mut bf = Interpreter::with_tape_capacity(b"<+".to_vec(), 5);
        assert!(bf.run().is_ok());
        assert_eq!(bf.tape.head(), 4);
        assert_eq!(bf.current_cell(), 1);

        let mut bf = Interpreter::with_tape_capacity(b">>>+".to_vec(), 3);
        assert!(bf.run().is_ok());
        assert_eq!(bf.tape.head(), 0);
        assert_eq!(bf.current_cell(), 1);
    }

    #[test]
    fn cell_arithmetic_wraps_modulo_256() {
        let mut bf = Interpreter::with_tape_capacity(b"-".to_vec(), 1);
        assert!(bf.run().is_ok());
        assert_eq!(bf.current_cell(), 255);

        let mut bf = Interpreter::with_tape_capacity("+".repeat(256).into_bytes(), 1);
        assert!(bf.run().is_ok());
        assert_eq!(bf.current_cell(), 0);
    }

    #[test]
    fn input_provider_feeds_cells_and_eof_leaves_cell_unmodified() {
        let out = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&out);
        // Read twice then print; the second read hits EOF so the first byte
        // must survive.
        let mut bf = Interpreter::new(b",,.".to_vec());
        let mut inputs = vec![7u8].into_iter();
        bf.set_input_provider(move || inputs.next());
        bf.set_output_sink(move |b| sink.lock().unwrap().push(b));
        assert!(bf.run().is_ok());
        assert_eq!(out.lock().unwrap().clone(), vec![7]);
    }

    #[test]
    fn scan_forward_skips_nested_pairs() {
        let src = b"[[][]]+";
        assert_eq!(scan_forward(src, 0), Some(6));
        assert_eq!(scan_forward(src, 1), Some(3));
        assert_eq!(scan_forward(src, 3), Some(5));
    }

    #[test]
    fn scan_backward_skips_nested_pairs() {
        let src = b"+[[][]]";
        assert_eq!(scan_backward(src, 6), Some(2));
        assert_eq!(scan_backward(src, 3), Some(3));
        assert_eq!(scan_backward(src, 5), Some(5));
    }

    #[test]
    fn scans_ignore_comment_bytes() {
        let src = b"[ no ] here";
        assert_eq!(scan_forward(src, 0), Some(6));
        assert_eq!(scan_backward(src, 5), Some(1));
    }

    #[test]
    fn scan_failures_return_none_at_stream_boundaries() {
        assert_eq!(scan_forward(b"[++", 0), None);
        assert_eq!(scan_backward(b"++]", 2), None);
        assert_eq!(scan_forward(b"[", 0), None);
        assert_eq!(scan_backward(b"]", 0), None);
    }

    #[test]
    fn runtime_scans_agree_with_static_label_resolution() {
        // Both matching algorithms must pair brackets identically: for every
        // pair, the forward scan from '[' lands after its ']' and the
        // backward scan from ']' lands after its '['.
        let programs: [&[u8]; 4] = [
            b"[-]",
            b"++[>++[>++<-]<-]>>.",
            b"[[][[]]][]",
            b"+[a[b]c[d[e]]f]+",
        ];
        for src in programs {
            assert!(resolve_labels(src).is_ok());

            let mut stack = Vec::new();
            let mut pairs = Vec::new();
            for (i, &b) in src.iter().enumerate() {
                match Opcode::classify(b) {
                    Some(Opcode::LoopOpen) => stack.push(i),
                    Some(Opcode::LoopClose) => pairs.push((stack.pop().unwrap(), i)),
                    _ => {}
                }
            }

            for (open, close) in pairs {
                assert_eq!(scan_forward(src, open), Some(close + 1));
                assert_eq!(scan_backward(src, close), Some(open + 1));
            }
        }
    }

    #[test]
    fn independent_runs_do_not_share_tape_state() {
        let mut first = Interpreter::with_tape_capacity(b"+++".to_vec(), 4);
        assert!(first.run().is_ok());
        assert_eq!(first.current_cell(), 3);

        let mut second = Interpreter::with_tape_capacity(b"".to_vec(), 4);
        assert!(second.run().is_ok());
        assert_eq!(second.current_cell(), 0);
    }

    #[test]
    fn debug_run_advances_state_without_io() {
        let mut bf = Interpreter::with_tape_capacity(b"+++.".to_vec(), 4);
        assert!(bf.run_debug().is_ok());
        assert_eq!(bf.current_cell(), 3);
    }
}
