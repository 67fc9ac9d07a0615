//! spal - Scripts Package Assembler for Linux.
//!
//! Generates `.spalcfg` build configurations and builds `.deb` packages
//! from them.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match spal::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("spal: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
