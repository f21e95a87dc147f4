use std::process::ExitCode;

fn main() -> ExitCode {
    match plotgrid::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("plotgrid: {e}");
            ExitCode::FAILURE
        }
    }
}
