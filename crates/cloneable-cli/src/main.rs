//! cloneable binary entry point.

#![forbid(unsafe_code)]

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let result = cloneable_cli::run(&args, &mut stdout, &mut stderr);
    let code = cloneable_cli::finish(result, &mut stderr);

    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}
