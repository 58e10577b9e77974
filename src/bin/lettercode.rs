/// Lettercode CLI
///
/// Runs, parses and checks Lettercode programs.

use lettercode::cli;

fn main() {
    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
