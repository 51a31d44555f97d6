use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli_util::print_build_error;
use crate::tape::DEFAULT_TAPE_CAPACITY;
use crate::translate::{self, BuildOptions, INTERMEDIATE_FILENAME};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct BuildArgs {
    /// Path of the Brainfuck source file
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Path of the native executable to produce
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "out")]
    pub output: PathBuf,

    /// Keep the intermediate C file instead of deleting it
    #[arg(short = 'k', long = "keep")]
    pub keep: bool,

    /// C compiler to invoke
    #[arg(long = "cc", value_name = "CC", default_value = "cc")]
    pub cc: String,

    /// Number of cells on the tape in the produced executable
    #[arg(long = "tape-size", value_name = "N", default_value_t = DEFAULT_TAPE_CAPACITY)]
    pub tape_size: usize,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: BuildArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let BuildArgs {
        source,
        output,
        keep,
        cc,
        tape_size,
        ..
    } = args;

    let Some(source_path) = source else {
        eprintln!("{program}: no input file provided");
        usage_and_exit(program, 2);
    };

    let source_bytes = match fs::read(&source_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{program}: failed to read source file: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let opts = BuildOptions {
        output,
        intermediate: PathBuf::from(INTERMEDIATE_FILENAME),
        keep_intermediate: keep,
        compiler: cc,
        tape_capacity: tape_size,
    };

    if let Err(err) = translate::build(&source_bytes, &opts) {
        print_build_error(Some(program), &source_bytes, &err);
        let _ = io::stderr().flush();
        return 1;
    }

    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} build <SOURCE> [-o <PATH>] [--keep|-k] [--cc <CC>]

Options:
  --output, -o <PATH>  Path of the native executable to produce (default "out")
  --keep,   -k         Keep the intermediate C file ({1}) instead of deleting it
  --cc <CC>            C compiler to invoke (default "cc")
  --tape-size <N>      Number of cells on the tape in the produced executable (default 30000)
  --help,   -h         Show this help

Description:
  Translates the Brainfuck source into a C program, hands it to the external
  C compiler, and produces a native executable.

Notes:
  - Unbalanced brackets are reported before anything is emitted.
  - The intermediate C file is deleted after the build unless --keep is given,
    whether or not the compiler succeeded.
"#,
        program, INTERMEDIATE_FILENAME
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
