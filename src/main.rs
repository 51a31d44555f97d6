use braingoo::commands::build::{self, BuildArgs};
use braingoo::commands::run::{self, RunArgs};
use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Write};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run   [--debug|-d] "<code>"      # Interpret Brainfuck code directly (args are concatenated)
  {0} run   [--debug|-d] --file <PATH> # Interpret Brainfuck code loaded from file
  {0} build <SOURCE> [-o <PATH>]       # Translate to C and compile a native executable

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "braingoo", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(RunArgs),
    Build(BuildArgs),
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("braingoo"));

    let cli = Cli::parse();

    if cli.help || cli.command.is_none() {
        print_top_usage_and_exit(&program, if cli.help { 0 } else { 2 });
    }

    let code = match cli.command.unwrap() {
        Command::Run(args) => run::run(&program, args),
        Command::Build(args) => build::run(&program, args),
    };

    std::process::exit(code);
}
