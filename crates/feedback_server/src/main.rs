use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match feedback_server::start_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=server status=error error={err}");
            eprintln!("feedback-server: {err}");
            ExitCode::FAILURE
        }
    }
}
