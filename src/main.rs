use std::process::ExitCode;

use portal_charts::app;

fn main() -> ExitCode {
    let Err(err) = app::run() else {
        return ExitCode::SUCCESS;
    };
    eprintln!("charts: {err}");
    ExitCode::from(err.exit_code())
}
