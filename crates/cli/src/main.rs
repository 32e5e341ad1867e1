use std::process::ExitCode;

fn main() -> ExitCode {
    ounibot_cli::run()
}
