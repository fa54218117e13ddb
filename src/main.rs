//! The Zinc programming language compiler CLI.
//!
//! This binary compiles a single `.zinc` source file to a native
//! executable and runs it: `zinc program.zinc` writes `out.asm`,
//! assembles it with `nasm`, links it with `ld` into `test`, and
//! executes `./test`. The process exits 0 only when every step,
//! including the compiled program itself, succeeded.

use clap::Parser;

mod diagnostics;
mod driver;

/// Command-line interface for the Zinc compiler.
#[derive(Parser)]
#[command(name = "zinc")]
#[command(about = "The Zinc programming language compiler", long_about = None)]
struct Cli {
    /// The source file to compile and run (e.g., `program.zinc`).
    file: String,
}

/// Entry point for the Zinc compiler.
fn main() {
    // Exit 1 on bad arguments (clap defaults to 2); help and version
    // output keep exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = if error.use_stderr() { 1 } else { 0 };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    match driver::run(&cli.file) {
        Ok(0) => {}
        Ok(_) => {
            eprintln!("Error: execution failed.");
            std::process::exit(1);
        }
        Err(error) => {
            diagnostics::report_error(error.filename(), error.source(), error.error());
            std::process::exit(1);
        }
    }
}
