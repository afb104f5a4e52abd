use std::process::ExitCode;

fn main() -> ExitCode {
    match recent_workspaces::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
