//! Terminal client for the feedback server.
//!
//! # Responsibility
//! - Drive the shared form controller from command-line arguments.
//! - Print the same user-facing messages the form shows.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use feedback_core::{init_console_logging, FeedbackField, FeedbackTransport, FormController};
use log::debug;

mod render;
mod transport;

use render::render_list;
use transport::HttpTransport;

const SUCCESS_NOTICE: &str = "Feedback submitted successfully!";

/// feedback - submit and review feedback
#[derive(Parser, Debug)]
#[command(name = "feedback")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the feedback server
    #[arg(long, env = "FEEDBACK_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit one piece of feedback
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },

    /// List all submitted feedback
    #[command(alias = "ls")]
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    init_console_logging(&cli.log_level).map_err(anyhow::Error::msg)?;

    let transport = HttpTransport::new(&cli.server_url).context("failed to build HTTP client")?;
    let mut controller = FormController::new(transport);

    let succeeded = match cli.command {
        Commands::Submit {
            name,
            email,
            message,
        } => submit(&mut controller, name, email, message),
        Commands::List => list(&mut controller),
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn submit<T: FeedbackTransport>(
    controller: &mut FormController<T>,
    name: String,
    email: String,
    message: String,
) -> bool {
    controller.update_field(FeedbackField::Name, name);
    controller.update_field(FeedbackField::Email, email);
    controller.update_field(FeedbackField::Message, message);

    match controller.submit() {
        Ok(outcome) => {
            debug!("event=cli_submit module=cli status=ok outcome={outcome:?}");
            println!("{SUCCESS_NOTICE}");
            true
        }
        Err(err) => {
            debug!("event=cli_submit module=cli status=error error={err}");
            if let Some(message) = controller.state().error.as_deref() {
                eprintln!("{message}");
            }
            false
        }
    }
}

fn list<T: FeedbackTransport>(controller: &mut FormController<T>) -> bool {
    match controller.toggle_feedback_list() {
        Ok(()) => {
            println!("{}", render_list(&controller.state().feedbacks, &Local));
            true
        }
        Err(err) => {
            debug!("event=cli_list module=cli status=error error={err}");
            eprintln!("{}", feedback_core::SUBMIT_FAILED_MESSAGE);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::{FeedbackRecord, NewFeedback, TransportError};
    use std::cell::Cell;

    struct StubTransport {
        posts: Cell<usize>,
        fail: bool,
    }

    impl FeedbackTransport for StubTransport {
        fn post_feedback(&self, _feedback: &NewFeedback) -> Result<(), TransportError> {
            self.posts.set(self.posts.get() + 1);
            if self.fail {
                return Err(TransportError::Network("refused".to_string()));
            }
            Ok(())
        }

        fn fetch_feedbacks(&self) -> Result<Vec<FeedbackRecord>, TransportError> {
            if self.fail {
                return Err(TransportError::Network("refused".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn stub(fail: bool) -> StubTransport {
        StubTransport {
            posts: Cell::new(0),
            fail,
        }
    }

    #[test]
    fn cli_parses_submit_arguments() {
        let cli = Cli::try_parse_from([
            "feedback",
            "--server-url",
            "http://example.test",
            "submit",
            "--name",
            "A",
            "--email",
            "a@b.com",
            "--message",
            "hi",
        ])
        .unwrap();

        assert_eq!(cli.server_url, "http://example.test");
        let Commands::Submit {
            name,
            email,
            message,
        } = cli.command
        else {
            panic!("expected submit command");
        };
        assert_eq!((name.as_str(), email.as_str(), message.as_str()), ("A", "a@b.com", "hi"));
    }

    #[test]
    fn cli_accepts_list_alias() {
        let cli = Cli::try_parse_from(["feedback", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn submit_with_missing_fields_sends_nothing() {
        let transport = stub(false);
        let mut controller = FormController::new(&transport);

        let ok = submit(&mut controller, "A".into(), String::new(), "hi".into());

        assert!(!ok);
        assert_eq!(transport.posts.get(), 0);
    }

    #[test]
    fn submit_reports_success_and_failure() {
        let transport = stub(false);
        let mut controller = FormController::new(&transport);
        assert!(submit(&mut controller, "A".into(), "a@b.com".into(), "hi".into()));

        let failing = stub(true);
        let mut controller = FormController::new(&failing);
        assert!(!submit(&mut controller, "A".into(), "a@b.com".into(), "hi".into()));
        assert_eq!(failing.posts.get(), 1);
    }

    #[test]
    fn list_reports_fetch_failure() {
        let failing = stub(true);
        let mut controller = FormController::new(&failing);
        assert!(!list(&mut controller));
        assert!(!controller.state().list_visible);
    }
}
