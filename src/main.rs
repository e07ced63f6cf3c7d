//! things2taskpaper - Things 3 to OmniFocus TaskPaper export

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = things_taskpaper::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
