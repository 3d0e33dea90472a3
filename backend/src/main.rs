use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match proxy::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Proxy failed: {e}");
            ExitCode::FAILURE
        }
    }
}
