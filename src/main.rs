//! lvsprite - Command-line tool for converting sprites into LVGL C arrays

use std::process::ExitCode;

use lvsprite::cli;

fn main() -> ExitCode {
    cli::run()
}
