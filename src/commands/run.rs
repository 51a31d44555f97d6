use clap::Args;
use std::fs;
use std::io::{self, Write};

use crate::Interpreter;
use crate::cli_util::print_interpreter_error;
use crate::tape::DEFAULT_TAPE_CAPACITY;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Number of cells on the tape
    #[arg(long = "tape-size", value_name = "N", default_value_t = DEFAULT_TAPE_CAPACITY)]
    pub tape_size: usize,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        debug,
        file,
        tape_size,
        code,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let source: Vec<u8> = if let Some(path) = file {
        match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("{program}: failed to read source file: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("").into_bytes()
    };

    let mut bf = Interpreter::with_tape_capacity(source.clone(), tape_size);
    let result = if debug { bf.run_debug() } else { bf.run() };

    if let Err(err) = result {
        // Bytes already written before the fault must survive the exit.
        let _ = io::stdout().flush();
        print_interpreter_error(Some(program), &source, &err);
        let _ = io::stderr().flush();
        return 1;
    }

    let _ = io::stdout().flush();
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] "<code>"
  {0} run [--debug|-d] --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --debug, -d         Print a step-by-step table of operations instead of executing
  --tape-size <N>     Number of cells on the tape (default 30000)
  --help,  -h         Show this help

Notes:
- Input (`,`) reads a single byte from stdin; at EOF the current cell is left unchanged.
- Any byte outside of Brainfuck's ><+-.,[] is a comment and is skipped.
- The tape is circular: the head wraps around at both ends.

Examples:
- Load Brainfuck code from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
