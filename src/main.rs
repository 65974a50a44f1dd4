use std::process::ExitCode;

fn main() -> ExitCode {
    match indicator_trends::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_reported() {
                eprintln!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
