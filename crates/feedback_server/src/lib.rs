//! HTTP front end for feedback collection.
//!
//! # Routes
//! - `POST /api/submit-feedback`: validate and store one submission.
//! - `GET /api/feedbacks`: list every stored submission.
//!
//! # Setup
//!
//! Environment variables, all optional:
//!
//! | variable             | default            |
//! |----------------------|--------------------|
//! | `FEEDBACK_PORT`      | `3000`             |
//! | `FEEDBACK_DB_PATH`   | `feedback.sqlite3`, or `:memory:` |
//! | `FEEDBACK_LOG_LEVEL` | `debug` / `info` by build mode |
//! | `FEEDBACK_LOG_DIR`   | unset logs to stderr |
//!
//! ```sh
//! FEEDBACK_DB_PATH=:memory: cargo run -p feedback_server
//! ```
use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    response::Response,
    routing::{get, post},
    Router,
};
use feedback_core::{
    core_version, init_console_logging, init_logging, LIST_FEEDBACKS_PATH, SUBMIT_FEEDBACK_PATH,
};
use log::{error, info, warn};
use tokio::{net::TcpListener, signal};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use error::{server_error_response, AppError};
use routes::{list_feedbacks_handler, submit_feedback_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(SUBMIT_FEEDBACK_PATH, post(submit_feedback_handler))
        .route(LIST_FEEDBACKS_PATH, get(list_feedbacks_handler))
        // Any body that parses is accepted; size never produces a non-JSON 413.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    // Payload details are already recorded by the logging panic hook.
    error!("event=request_panicked module=server status=error error_code=unexpected");
    server_error_response()
}

pub async fn start_server() -> Result<(), AppError> {
    let config = Config::load()?;

    let logging = match config.log_dir.as_deref() {
        Some(dir) => init_logging(&config.log_level, dir),
        None => init_console_logging(&config.log_level),
    };
    logging.map_err(AppError::Logging)?;

    info!(
        "event=server_init module=server status=start version={}",
        core_version()
    );
    config.log_summary();

    let address = config.address();
    let state = AppState::open(&config.db)?;
    let app = router(state);

    let listener = TcpListener::bind(&address).await?;
    info!("event=server_listen module=server status=ok address={address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("event=shutdown module=server signal=ctrl_c"),
            Err(err) => {
                warn!("event=shutdown module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=server signal=terminate");
            }
            Err(err) => {
                warn!("event=shutdown module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
