use std::process::ExitCode;

fn main() -> ExitCode {
    planfit_cli::run()
}
